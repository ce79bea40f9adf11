//! Discount Manager
//!
//! Runs the fixed, ordered strategy registry against one cart snapshot and
//! folds the results into an `AnalysisReport`.

use rust_decimal::Decimal;
use shared::models::DiscountKind;
use shared::order::{AnalysisReport, CartSnapshot};
use std::sync::Arc;

use super::strategy::{DiscountStrategy, EvaluationContext, StrategyAction};
use crate::core::{EngineError, EngineResult};
use crate::db::DiscountStore;

/// Registration order of the strategies. Changing it changes results.
pub const STRATEGY_ORDER: [DiscountKind; 3] = [
    DiscountKind::OverPricePercent,
    DiscountKind::FreePieceByCategory,
    DiscountKind::CheapestPercentByCategory,
];

/// Stacking and capping policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisPolicy {
    /// Every strategy sees the undiscounted cart. Otherwise each strategy
    /// sees the cart as earlier results left it: total-based rules use the
    /// total minus what was already saved, line-level savings are scaled
    /// by the share of the cart still payable.
    pub stack_on_original: bool,
    /// `effective_saved` is bounded by the cart total
    pub cap_at_grand_total: bool,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            stack_on_original: true,
            cap_at_grand_total: false,
        }
    }
}

/// Discount Manager - stateless, safe to share between threads
#[derive(Clone)]
pub struct DiscountManager {
    strategies: Arc<[StrategyAction]>,
    store: Arc<dyn DiscountStore>,
    policy: AnalysisPolicy,
}

impl std::fmt::Debug for DiscountManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountManager")
            .field("strategies", &self.strategies)
            .field("store", &"<DiscountStore>")
            .field("policy", &self.policy)
            .finish()
    }
}

impl DiscountManager {
    pub fn new(store: Arc<dyn DiscountStore>, policy: AnalysisPolicy) -> Self {
        let strategies: Vec<StrategyAction> =
            STRATEGY_ORDER.into_iter().map(StrategyAction::from).collect();

        Self {
            strategies: strategies.into(),
            store,
            policy,
        }
    }

    pub fn with_default_policy(store: Arc<dyn DiscountStore>) -> Self {
        Self::new(store, AnalysisPolicy::default())
    }

    pub fn strategies(&self) -> &[StrategyAction] {
        &self.strategies
    }

    pub fn policy(&self) -> AnalysisPolicy {
        self.policy
    }

    /// Analyze a cart snapshot.
    ///
    /// Any store failure aborts the run; no partial report is returned.
    pub fn analyze(&self, snapshot: &CartSnapshot) -> EngineResult<AnalysisReport> {
        snapshot.validate().inspect_err(|e| {
            tracing::warn!(error = %e, "Rejecting invalid cart snapshot");
        })?;

        let mut results = Vec::new();
        let mut skipped = Vec::new();
        let mut saved = Decimal::ZERO;

        for strategy in self.strategies.iter() {
            let ctx = EvaluationContext::new(snapshot, self.policy.stack_on_original, saved);
            let outcome = strategy.evaluate(&ctx, self.store.as_ref())?;

            tracing::debug!(
                kind = %strategy.kind(),
                results = outcome.results.len(),
                skipped = outcome.skipped.len(),
                saved = %outcome.saved(),
                "Strategy evaluated"
            );

            for result in &outcome.results {
                saved = saved.checked_add(result.amount).ok_or_else(|| {
                    tracing::error!(rule_id = result.rule_id, "Discount total overflows");
                    EngineError::AmountOverflow
                })?;
            }
            results.extend(outcome.results);
            skipped.extend(outcome.skipped);
        }

        let report = AnalysisReport::new(
            snapshot.grand_total(),
            results,
            skipped,
            self.policy.cap_at_grand_total,
        );

        tracing::info!(
            lines = snapshot.lines().len(),
            grand_total = %report.grand_total(),
            results = report.results().len(),
            total_saved = %report.total_saved(),
            effective_saved = %report.effective_saved(),
            "Discount analysis finished"
        );

        Ok(report)
    }
}
