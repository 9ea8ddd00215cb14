use std::collections::BTreeMap;

use stockledger_core::{ArticleCode, CodeGenerator, Entity};
use tracing::debug;

use crate::article::{Article, ArticleDraft};
use crate::error::{InventoryError, InventoryResult};

/// The articles of one warehouse session.
///
/// Codes come from the inventory's own generator and only ever grow, so the
/// map's key order is also insertion order. Listing and export rely on that.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    articles: BTreeMap<ArticleCode, Article>,
    codes: CodeGenerator,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Articles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Article> + '_ {
        self.articles.values()
    }

    /// Validate `draft`, assign it the next code and store it.
    pub fn register(&mut self, draft: ArticleDraft) -> InventoryResult<ArticleCode> {
        draft.validate()?;
        self.insert_validated(draft)
    }

    /// Register every draft, or none of them.
    ///
    /// All drafts are validated before the first insert, so a bad record
    /// anywhere in the batch leaves the inventory untouched.
    pub fn register_batch(&mut self, drafts: Vec<ArticleDraft>) -> InventoryResult<Vec<ArticleCode>> {
        for draft in &drafts {
            draft.validate()?;
        }
        drafts
            .into_iter()
            .map(|draft| self.insert_validated(draft))
            .collect()
    }

    fn insert_validated(&mut self, draft: ArticleDraft) -> InventoryResult<ArticleCode> {
        let code = self.codes.peek();
        if self.articles.contains_key(&code) {
            return Err(InventoryError::Duplicate(code));
        }
        self.codes.advance();

        let article = Article::from_validated(code, draft);
        debug!(%code, description = %article.description(), quantity = article.quantity(), "article registered");
        self.articles.insert(*article.id(), article);
        Ok(code)
    }

    /// Remove the article with `code`. `Ok(false)` when there was none.
    pub fn remove(&mut self, code: ArticleCode) -> InventoryResult<bool> {
        if !code.is_assignable() {
            return Err(InventoryError::InvalidCode(code));
        }
        let removed = self.articles.remove(&code).is_some();
        debug!(%code, removed, "article removal");
        Ok(removed)
    }

    pub fn find(&self, code: ArticleCode) -> InventoryResult<&Article> {
        self.articles
            .get(&code)
            .ok_or(InventoryError::NotFound(code))
    }

    fn find_mut(&mut self, code: ArticleCode) -> InventoryResult<&mut Article> {
        self.articles
            .get_mut(&code)
            .ok_or(InventoryError::NotFound(code))
    }

    pub fn increment_quantity(&mut self, code: ArticleCode, amount: i64) -> InventoryResult<()> {
        let article = self.find_mut(code)?;
        article.increment(amount)?;
        debug!(%code, amount, quantity = article.quantity(), "stock incremented");
        Ok(())
    }

    pub fn decrement_quantity(&mut self, code: ArticleCode, amount: i64) -> InventoryResult<()> {
        let article = self.find_mut(code)?;
        article.decrement(amount)?;
        debug!(%code, amount, quantity = article.quantity(), "stock decremented");
        Ok(())
    }

    /// Human-readable listing, one article per line.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl core::fmt::Display for Inventory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.articles.is_empty() {
            return write!(f, "Inventory is empty");
        }
        write!(f, "Inventory ({} articles):", self.articles.len())?;
        for article in self.articles.values() {
            write!(f, "\n  {article}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NumberViolation;
    use proptest::prelude::*;

    fn widget() -> ArticleDraft {
        ArticleDraft::new(10.0, 15.0, "Widget", 5, 2, 20)
    }

    fn code(value: u64) -> ArticleCode {
        ArticleCode::new(value)
    }

    #[test]
    fn widget_walkthrough() {
        let mut inventory = Inventory::new();

        let widget_code = inventory.register(widget()).unwrap();
        assert_eq!(widget_code, code(1));
        assert_eq!(inventory.find(code(1)).unwrap().quantity(), 5);

        inventory.decrement_quantity(code(1), 3).unwrap();
        assert_eq!(inventory.find(code(1)).unwrap().quantity(), 2);

        let err = inventory.decrement_quantity(code(1), 10).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::NegativeNumber(NumberViolation::InsufficientStock { .. })
        ));
        assert_eq!(inventory.find(code(1)).unwrap().quantity(), 2);

        assert!(inventory.remove(code(1)).unwrap());
        assert_eq!(
            inventory.find(code(1)).unwrap_err(),
            InventoryError::NotFound(code(1))
        );
    }

    #[test]
    fn rejected_registration_leaves_inventory_unchanged() {
        let mut inventory = Inventory::new();
        inventory.register(widget()).unwrap();

        let err = inventory
            .register(ArticleDraft::new(-1.0, 1.0, "Bad", 1, 0, 0))
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::NegativeNumber(NumberViolation::PurchasePrice(-1.0))
        );

        let err = inventory
            .register(ArticleDraft::new(1.0, 1.0, "Bad", -1, 0, 0))
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::NegativeNumber(NumberViolation::Quantity(-1))
        );

        assert_eq!(inventory.len(), 1);
        // A failed registration does not consume a code.
        assert_eq!(inventory.register(widget()).unwrap(), code(2));
    }

    #[test]
    fn inventories_number_independently() {
        let mut first = Inventory::new();
        let mut second = Inventory::new();
        first.register(widget()).unwrap();
        first.register(widget()).unwrap();
        assert_eq!(second.register(widget()).unwrap(), code(1));
    }

    #[test]
    fn codes_are_not_reused_after_removal() {
        let mut inventory = Inventory::new();
        let a = inventory.register(widget()).unwrap();
        assert!(inventory.remove(a).unwrap());
        let b = inventory.register(widget()).unwrap();
        assert!(b > a);
    }

    #[test]
    fn remove_unknown_code_returns_false() {
        let mut inventory = Inventory::new();
        inventory.register(widget()).unwrap();
        assert!(!inventory.remove(code(99)).unwrap());
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn remove_code_zero_is_invalid() {
        let mut inventory = Inventory::new();
        assert_eq!(
            inventory.remove(code(0)).unwrap_err(),
            InventoryError::InvalidCode(code(0))
        );
    }

    #[test]
    fn adjusting_unknown_article_is_not_found() {
        let mut inventory = Inventory::new();
        assert_eq!(
            inventory.increment_quantity(code(4), 1).unwrap_err(),
            InventoryError::NotFound(code(4))
        );
        assert_eq!(
            inventory.decrement_quantity(code(4), 1).unwrap_err(),
            InventoryError::NotFound(code(4))
        );
    }

    #[test]
    fn increment_rejects_negative_amount() {
        let mut inventory = Inventory::new();
        let c = inventory.register(widget()).unwrap();
        assert_eq!(
            inventory.increment_quantity(c, -2).unwrap_err(),
            InventoryError::NegativeNumber(NumberViolation::NegativeAmount(-2))
        );
        assert_eq!(inventory.find(c).unwrap().quantity(), 5);
    }

    #[test]
    fn listing_keeps_insertion_order() {
        let mut inventory = Inventory::new();
        for name in ["Bolt", "Nut", "Washer"] {
            inventory
                .register(ArticleDraft::new(1.0, 2.0, name, 1, 0, 10))
                .unwrap();
        }
        inventory.remove(code(2)).unwrap();
        inventory
            .register(ArticleDraft::new(1.0, 2.0, "Screw", 1, 0, 10))
            .unwrap();

        let names: Vec<&str> = inventory.iter().map(|a| a.description()).collect();
        assert_eq!(names, ["Bolt", "Washer", "Screw"]);

        let rendered = inventory.render();
        assert!(rendered.starts_with("Inventory (3 articles):"));
        let bolt = rendered.find("Bolt").unwrap();
        let screw = rendered.find("Screw").unwrap();
        assert!(bolt < screw);
    }

    #[test]
    fn render_empty_inventory() {
        assert_eq!(Inventory::new().render(), "Inventory is empty");
    }

    #[test]
    fn batch_with_one_bad_draft_commits_nothing() {
        let mut inventory = Inventory::new();
        inventory.register(widget()).unwrap();

        let drafts = vec![
            ArticleDraft::new(1.0, 2.0, "Ok", 1, 0, 0),
            ArticleDraft::new(1.0, -2.0, "Bad", 1, 0, 0),
        ];
        let err = inventory.register_batch(drafts).unwrap_err();
        assert_eq!(
            err,
            InventoryError::NegativeNumber(NumberViolation::SalePrice(-2.0))
        );
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.register(widget()).unwrap(), code(2));
    }

    #[test]
    fn occupied_next_code_is_a_duplicate() {
        let mut inventory = Inventory::new();
        inventory.register(widget()).unwrap();

        let clash = inventory.codes.peek();
        let squatter = ArticleDraft::new(1.0, 1.0, "Squatter", 1, 0, 0);
        inventory
            .articles
            .insert(clash, Article::from_validated(clash, squatter));

        let err = inventory.register(widget()).unwrap_err();
        assert_eq!(err, InventoryError::Duplicate(clash));
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.find(clash).unwrap().description(), "Squatter");
        assert_eq!(inventory.codes.peek(), clash);
    }

    #[test]
    fn batch_assigns_fresh_codes_in_order() {
        let mut inventory = Inventory::new();
        inventory.register(widget()).unwrap();
        let codes = inventory
            .register_batch(vec![widget(), widget()])
            .unwrap();
        assert_eq!(codes, vec![code(2), code(3)]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: each registered code is strictly greater than every
        /// previously assigned code, even with removals in between.
        #[test]
        fn registered_codes_strictly_increase(ops in prop::collection::vec(any::<bool>(), 1..64)) {
            let mut inventory = Inventory::new();
            let mut highest = ArticleCode::new(0);
            for register in ops {
                if register {
                    let c = inventory.register(widget()).unwrap();
                    prop_assert!(c > highest);
                    highest = c;
                } else {
                    let first = inventory.iter().next().map(|a| a.code());
                    if let Some(first) = first {
                        prop_assert!(inventory.remove(first).unwrap());
                    }
                }
            }
        }
    }
}
