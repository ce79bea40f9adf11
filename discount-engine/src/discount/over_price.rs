//! Over-price percentage strategy
//!
//! X% off the cart once its total reaches the rule's threshold.

use rust_decimal::Decimal;
use shared::models::{DiscountKind, DiscountTerms};
use shared::order::AppliedDiscount;

use super::money::{format_percent, percent_of};
use super::strategy::{DiscountStrategy, EvaluationContext, StrategyOutcome, load_rules};
use crate::core::EngineResult;
use crate::db::DiscountStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct OverPricePercentStrategy;

impl DiscountStrategy for OverPricePercentStrategy {
    fn kind(&self) -> DiscountKind {
        DiscountKind::OverPricePercent
    }

    fn evaluate(
        &self,
        ctx: &EvaluationContext<'_>,
        store: &dyn DiscountStore,
    ) -> EngineResult<StrategyOutcome> {
        let mut outcome = StrategyOutcome::default();
        let rules = load_rules(store, self.kind(), &mut outcome.skipped)?;

        let mut saved_here = Decimal::ZERO;
        for (rule, terms) in rules {
            let DiscountTerms::OverPricePercent {
                threshold,
                percentage,
            } = terms
            else {
                continue;
            };

            // Qualification always looks at what the customer actually put in the cart
            if ctx.grand_total() < threshold {
                tracing::debug!(
                    rule_id = rule.id,
                    grand_total = %ctx.grand_total(),
                    threshold = %threshold,
                    "Cart total below threshold"
                );
                continue;
            }

            let basis = ctx.basis_total(saved_here);
            let amount = percent_of(basis, percentage);
            saved_here = saved_here.saturating_add(amount);

            let reason = format!(
                "{} off orders of {} or more (basis {})",
                format_percent(percentage),
                threshold.normalize(),
                basis
            );
            outcome
                .results
                .push(AppliedDiscount::from_rule(&rule, reason, amount));
        }

        Ok(outcome)
    }
}
