//! Inventory domain module.
//!
//! This crate contains the business rules for a single warehouse: articles,
//! their stock adjustments, and the collection that keeps their identities
//! unique. Pure domain logic (no IO).

pub mod article;
pub mod error;
pub mod inventory;

pub use article::{Article, ArticleDraft};
pub use error::{InventoryError, InventoryResult, NumberViolation};
pub use inventory::Inventory;
