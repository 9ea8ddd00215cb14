//! Inventory error model.

use stockledger_core::{ArticleCode, DomainError};
use thiserror::Error;

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Which numeric rule a rejected input broke.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberViolation {
    PurchasePrice(f64),
    SalePrice(f64),
    Quantity(i64),
    /// Increment/decrement called with a negative amount.
    NegativeAmount(i64),
    /// Decrement larger than the stock on hand.
    InsufficientStock { available: i64, requested: i64 },
    QuantityOverflow { current: i64, amount: i64 },
}

impl core::fmt::Display for NumberViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PurchasePrice(v) => write!(f, "purchase price cannot be negative ({v})"),
            Self::SalePrice(v) => write!(f, "sale price cannot be negative ({v})"),
            Self::Quantity(v) => write!(f, "quantity cannot be negative ({v})"),
            Self::NegativeAmount(v) => {
                write!(f, "stock cannot be adjusted by a negative amount ({v})")
            }
            Self::InsufficientStock {
                available,
                requested,
            } => write!(
                f,
                "cannot remove {requested} units, only {available} in stock"
            ),
            Self::QuantityOverflow { current, amount } => {
                write!(f, "adding {amount} units to {current} overflows the quantity")
            }
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryError {
    /// Any invalid numeric input; the violation says which field or rule.
    #[error("{0}")]
    NegativeNumber(NumberViolation),

    #[error("article {0} already exists")]
    Duplicate(ArticleCode),

    #[error("no article with code {0}")]
    NotFound(ArticleCode),

    #[error("code {0} is not a valid article code")]
    InvalidCode(ArticleCode),
}

impl From<NumberViolation> for InventoryError {
    fn from(value: NumberViolation) -> Self {
        Self::NegativeNumber(value)
    }
}

impl From<InventoryError> for DomainError {
    fn from(value: InventoryError) -> Self {
        let msg = value.to_string();
        match value {
            InventoryError::NegativeNumber(NumberViolation::InsufficientStock { .. })
            | InventoryError::NegativeNumber(NumberViolation::QuantityOverflow { .. }) => {
                DomainError::invariant(msg)
            }
            InventoryError::NegativeNumber(_) => DomainError::validation(msg),
            InventoryError::Duplicate(_) => DomainError::conflict(msg),
            InventoryError::NotFound(_) => DomainError::not_found(msg),
            InventoryError::InvalidCode(_) => DomainError::invalid_id(msg),
        }
    }
}
