//! In-memory Discount Rule Repository

use super::{DiscountCriteria, DiscountStore, OrderBy, StoreResult};
use parking_lot::RwLock;
use shared::models::DiscountRule;
use std::path::Path;

/// Discount rules held in memory behind a read-write lock
#[derive(Debug, Default)]
pub struct InMemoryDiscountStore {
    rules: RwLock<Vec<DiscountRule>>,
}

impl InMemoryDiscountStore {
    pub fn new(rules: Vec<DiscountRule>) -> Self {
        Self {
            rules: RwLock::new(rules),
        }
    }

    /// Load rules from a JSON array
    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let rules: Vec<DiscountRule> = serde_json::from_str(json)?;
        Ok(Self::new(rules))
    }

    /// Load rules from a JSON file containing an array of rules
    pub fn from_json_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), rules = store.len(), "Loaded discount rules");
        Ok(store)
    }

    /// Insert a rule or replace the one with the same id
    pub fn upsert(&self, rule: DiscountRule) {
        let mut rules = self.rules.write();
        match rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule,
            None => rules.push(rule),
        }
    }

    pub fn remove(&self, id: i64) -> bool {
        let mut rules = self.rules.write();
        let before = rules.len();
        rules.retain(|r| r.id != id);
        rules.len() != before
    }

    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }
}

impl DiscountStore for InMemoryDiscountStore {
    fn find_many(
        &self,
        criteria: &DiscountCriteria,
        order_by: Option<OrderBy>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> StoreResult<Vec<DiscountRule>> {
        let mut matched: Vec<DiscountRule> = self
            .rules
            .read()
            .iter()
            .filter(|rule| criteria.matches(rule))
            .cloned()
            .collect();

        let order_by = order_by.unwrap_or_default();
        matched.sort_by(|a, b| order_by.compare(a, b));

        Ok(matched
            .into_iter()
            .skip(offset.unwrap_or(0))
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }
}
