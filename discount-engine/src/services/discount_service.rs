//! Discount Service - rule lookups and analysis of the current cart

use shared::models::DiscountRule;
use shared::order::{AnalysisReport, CartSnapshot};
use std::sync::Arc;

use super::cart_provider::CartSnapshotProvider;
use crate::core::{EngineConfig, EngineError, EngineResult};
use crate::db::{DiscountCriteria, DiscountStore, InMemoryDiscountStore, OrderBy};
use crate::discount::{AnalysisPolicy, DiscountManager};

/// Facade over the rule store and the discount manager
#[derive(Clone)]
pub struct DiscountService {
    store: Arc<dyn DiscountStore>,
    manager: DiscountManager,
}

impl std::fmt::Debug for DiscountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountService")
            .field("store", &"<DiscountStore>")
            .field("manager", &self.manager)
            .finish()
    }
}

impl DiscountService {
    pub fn new(store: Arc<dyn DiscountStore>, policy: AnalysisPolicy) -> Self {
        Self {
            manager: DiscountManager::new(store.clone(), policy),
            store,
        }
    }

    /// Build from config, seeding an in-memory store from `rules_path` if set
    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        let store = match &config.rules_path {
            Some(path) => InMemoryDiscountStore::from_json_file(path)?,
            None => {
                tracing::warn!("DISCOUNT_RULES_PATH not set, starting with an empty rule store");
                InMemoryDiscountStore::default()
            }
        };
        Ok(Self::new(Arc::new(store), config.policy()))
    }

    pub fn manager(&self) -> &DiscountManager {
        &self.manager
    }

    /// Single rule lookup
    pub fn get_discount(
        &self,
        criteria: &DiscountCriteria,
        order_by: Option<OrderBy>,
        raise_on_absent: bool,
    ) -> EngineResult<Option<DiscountRule>> {
        Ok(self.store.find_one(criteria, order_by, raise_on_absent)?)
    }

    /// Rule listing
    pub fn get_discounts(
        &self,
        criteria: &DiscountCriteria,
        order_by: Option<OrderBy>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> EngineResult<Vec<DiscountRule>> {
        Ok(self.store.find_many(criteria, order_by, limit, offset)?)
    }

    pub fn analyze(&self, snapshot: &CartSnapshot) -> EngineResult<AnalysisReport> {
        self.manager.analyze(snapshot)
    }

    /// Analyze whatever the provider reports as the current cart
    pub fn analyze_current(&self, provider: &dyn CartSnapshotProvider) -> EngineResult<AnalysisReport> {
        let snapshot = provider
            .current_snapshot()
            .map_err(EngineError::SnapshotUnavailable)?;
        self.analyze(&snapshot)
    }
}
