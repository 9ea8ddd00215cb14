use stockledger_core::{ArticleCode, Entity};

use crate::error::{InventoryResult, NumberViolation};

/// Caller-supplied fields of an article that has not been assigned a code yet.
///
/// Registration and file imports both build drafts, so loaded records go
/// through the same validation as user input.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDraft {
    pub description: String,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub quantity: i64,
    pub safety_stock: i64,
    pub max_stock: i64,
}

impl ArticleDraft {
    pub fn new(
        purchase_price: f64,
        sale_price: f64,
        description: impl Into<String>,
        quantity: i64,
        safety_stock: i64,
        max_stock: i64,
    ) -> Self {
        Self {
            description: description.into(),
            purchase_price,
            sale_price,
            quantity,
            safety_stock,
            max_stock,
        }
    }

    /// Check the non-negativity rules. Safety and max stock are advisory and
    /// not checked.
    pub fn validate(&self) -> InventoryResult<()> {
        if is_negative_or_nan(self.purchase_price) {
            return Err(NumberViolation::PurchasePrice(self.purchase_price).into());
        }
        if is_negative_or_nan(self.sale_price) {
            return Err(NumberViolation::SalePrice(self.sale_price).into());
        }
        if self.quantity < 0 {
            return Err(NumberViolation::Quantity(self.quantity).into());
        }
        Ok(())
    }
}

fn is_negative_or_nan(value: f64) -> bool {
    value.is_nan() || value < 0.0
}

/// A stock-keeping unit.
///
/// Identity is the code: equality and hashing ignore every other field.
#[derive(Debug, Clone)]
pub struct Article {
    code: ArticleCode,
    purchase_price: f64,
    sale_price: f64,
    description: String,
    quantity: i64,
    safety_stock: i64,
    max_stock: i64,
}

impl Article {
    /// Build an article from a draft that already passed [`ArticleDraft::validate`].
    pub(crate) fn from_validated(code: ArticleCode, draft: ArticleDraft) -> Self {
        Self {
            code,
            purchase_price: draft.purchase_price,
            sale_price: draft.sale_price,
            description: draft.description,
            quantity: draft.quantity,
            safety_stock: draft.safety_stock,
            max_stock: draft.max_stock,
        }
    }

    pub fn code(&self) -> ArticleCode {
        self.code
    }

    pub fn purchase_price(&self) -> f64 {
        self.purchase_price
    }

    pub fn sale_price(&self) -> f64 {
        self.sale_price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn safety_stock(&self) -> i64 {
        self.safety_stock
    }

    pub fn max_stock(&self) -> i64 {
        self.max_stock
    }

    /// Add `amount` units. `max_stock` is not enforced.
    pub fn increment(&mut self, amount: i64) -> InventoryResult<()> {
        if amount < 0 {
            return Err(NumberViolation::NegativeAmount(amount).into());
        }
        self.quantity = self.quantity.checked_add(amount).ok_or(
            NumberViolation::QuantityOverflow {
                current: self.quantity,
                amount,
            },
        )?;
        Ok(())
    }

    /// Remove `amount` units. Fails without touching the quantity if fewer
    /// than `amount` are on hand.
    pub fn decrement(&mut self, amount: i64) -> InventoryResult<()> {
        if amount < 0 {
            return Err(NumberViolation::NegativeAmount(amount).into());
        }
        if amount > self.quantity {
            return Err(NumberViolation::InsufficientStock {
                available: self.quantity,
                requested: amount,
            }
            .into());
        }
        self.quantity -= amount;
        Ok(())
    }

    /// The fields needed to recreate this article under a new code.
    pub fn to_draft(&self) -> ArticleDraft {
        ArticleDraft {
            description: self.description.clone(),
            purchase_price: self.purchase_price,
            sale_price: self.sale_price,
            quantity: self.quantity,
            safety_stock: self.safety_stock,
            max_stock: self.max_stock,
        }
    }
}

impl Entity for Article {
    type Id = ArticleCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Article {}

impl core::hash::Hash for Article {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl core::fmt::Display for Article {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Article [code={}, purchase_price={:?}, sale_price={:?}, description={}, quantity={}, safety_stock={}, max_stock={}]",
            self.code,
            self.purchase_price,
            self.sale_price,
            self.description,
            self.quantity,
            self.safety_stock,
            self.max_stock,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use proptest::prelude::*;

    fn widget(quantity: i64) -> Article {
        let draft = ArticleDraft::new(10.0, 15.0, "Widget", quantity, 2, 20);
        draft.validate().unwrap();
        Article::from_validated(ArticleCode::new(1), draft)
    }

    #[test]
    fn validate_rejects_negative_purchase_price() {
        let err = ArticleDraft::new(-1.0, 15.0, "Widget", 5, 2, 20)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::NegativeNumber(NumberViolation::PurchasePrice(-1.0))
        );
    }

    #[test]
    fn validate_rejects_negative_sale_price() {
        let err = ArticleDraft::new(1.0, -0.5, "Widget", 5, 2, 20)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::NegativeNumber(NumberViolation::SalePrice(-0.5))
        );
    }

    #[test]
    fn validate_rejects_negative_quantity() {
        let err = ArticleDraft::new(1.0, 2.0, "Widget", -3, 2, 20)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::NegativeNumber(NumberViolation::Quantity(-3))
        );
    }

    #[test]
    fn validate_rejects_nan_price() {
        let err = ArticleDraft::new(f64::NAN, 2.0, "Widget", 1, 0, 0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            InventoryError::NegativeNumber(NumberViolation::PurchasePrice(_))
        ));
    }

    #[test]
    fn stock_bounds_are_not_validated() {
        // Safety stock above max stock, and quantity outside both, are accepted.
        ArticleDraft::new(0.0, 0.0, "", 100, 50, 10)
            .validate()
            .unwrap();
        ArticleDraft::new(0.0, 0.0, "", 0, -5, -1).validate().unwrap();
    }

    #[test]
    fn decrement_past_zero_leaves_quantity_unchanged() {
        let mut article = widget(2);
        let err = article.decrement(10).unwrap_err();
        assert_eq!(
            err,
            InventoryError::NegativeNumber(NumberViolation::InsufficientStock {
                available: 2,
                requested: 10
            })
        );
        assert_eq!(article.quantity(), 2);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut article = widget(5);
        assert!(matches!(
            article.increment(-1),
            Err(InventoryError::NegativeNumber(NumberViolation::NegativeAmount(-1)))
        ));
        assert!(matches!(
            article.decrement(-1),
            Err(InventoryError::NegativeNumber(NumberViolation::NegativeAmount(-1)))
        ));
        assert_eq!(article.quantity(), 5);
    }

    #[test]
    fn increment_ignores_max_stock() {
        let mut article = widget(5);
        article.increment(1_000).unwrap();
        assert_eq!(article.quantity(), 1_005);
    }

    #[test]
    fn increment_overflow_is_rejected() {
        let mut article = widget(i64::MAX);
        assert!(matches!(
            article.increment(1),
            Err(InventoryError::NegativeNumber(NumberViolation::QuantityOverflow { .. }))
        ));
        assert_eq!(article.quantity(), i64::MAX);
    }

    #[test]
    fn equality_is_by_code_only() {
        let a = Article::from_validated(
            ArticleCode::new(3),
            ArticleDraft::new(1.0, 2.0, "A", 1, 0, 0),
        );
        let b = Article::from_validated(
            ArticleCode::new(3),
            ArticleDraft::new(9.0, 9.0, "B", 9, 9, 9),
        );
        let c = Article::from_validated(
            ArticleCode::new(4),
            ArticleDraft::new(1.0, 2.0, "A", 1, 0, 0),
        );
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn entity_id_is_the_code() {
        let article = widget(1);
        assert_eq!(*Entity::id(&article), article.code());
    }

    #[test]
    fn to_draft_drops_only_the_code() {
        let draft = ArticleDraft::new(10.0, 15.0, "Widget", 4, 2, 20);
        let article = Article::from_validated(ArticleCode::new(9), draft.clone());
        assert_eq!(article.to_draft(), draft);
    }

    #[test]
    fn display_lists_every_field() {
        let text = widget(5).to_string();
        assert_eq!(
            text,
            "Article [code=1, purchase_price=10.0, sale_price=15.0, description=Widget, quantity=5, safety_stock=2, max_stock=20]"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: increment(a) followed by decrement(a) restores the quantity.
        #[test]
        fn increment_then_decrement_restores(start in 0i64..1_000_000, amount in 0i64..1_000_000) {
            let mut article = widget(start);
            article.increment(amount).unwrap();
            article.decrement(amount).unwrap();
            prop_assert_eq!(article.quantity(), start);
        }

        /// Property: decrement never produces a negative quantity.
        #[test]
        fn decrement_never_goes_negative(start in 0i64..1_000, amount in 0i64..2_000) {
            let mut article = widget(start);
            let result = article.decrement(amount);
            prop_assert!(article.quantity() >= 0);
            if amount > start {
                prop_assert!(result.is_err());
                prop_assert_eq!(article.quantity(), start);
            } else {
                prop_assert_eq!(article.quantity(), start - amount);
            }
        }
    }
}
