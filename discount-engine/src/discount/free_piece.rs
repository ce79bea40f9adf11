//! Free-piece-by-category strategy
//!
//! For every `required_quantity` units bought in a category, `free_quantity`
//! units are waived. Waived units are priced at the cheapest line of the
//! category.

use rust_decimal::Decimal;
use shared::models::{DiscountKind, DiscountTerms};
use shared::order::AppliedDiscount;

use super::strategy::{DiscountStrategy, EvaluationContext, StrategyOutcome, load_rules};
use crate::core::EngineResult;
use crate::db::DiscountStore;

/// Units waived for `quantity` bought units.
///
/// `floor(quantity / required) * free`, never more than `quantity`.
/// `required` must be positive.
pub fn free_units(quantity: i64, required_quantity: i32, free_quantity: i32) -> i64 {
    let required = i64::from(required_quantity);
    if required <= 0 || quantity < required {
        return 0;
    }
    let batches = quantity / required;
    batches
        .saturating_mul(i64::from(free_quantity.max(0)))
        .min(quantity)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FreePieceStrategy;

impl DiscountStrategy for FreePieceStrategy {
    fn kind(&self) -> DiscountKind {
        DiscountKind::FreePieceByCategory
    }

    fn evaluate(
        &self,
        ctx: &EvaluationContext<'_>,
        store: &dyn DiscountStore,
    ) -> EngineResult<StrategyOutcome> {
        let mut outcome = StrategyOutcome::default();
        let rules = load_rules(store, self.kind(), &mut outcome.skipped)?;
        let snapshot = ctx.snapshot();

        for (rule, terms) in rules {
            let DiscountTerms::FreePieceByCategory {
                category_id,
                required_quantity,
                free_quantity,
            } = terms
            else {
                continue;
            };

            let Some(quantity) = snapshot.category_quantity(category_id) else {
                continue;
            };
            if quantity < i64::from(required_quantity) {
                tracing::debug!(
                    rule_id = rule.id,
                    category_id,
                    quantity,
                    required_quantity,
                    "Not enough units in category"
                );
                continue;
            }
            let Some(cheapest) = snapshot.cheapest_in_category(category_id) else {
                continue;
            };

            let units = free_units(quantity, required_quantity, free_quantity);
            let amount = ctx.line_saving(cheapest.unit_price.saturating_mul(Decimal::from(units)));

            let reason = format!(
                "{} free × {} ({} units bought, {} free per {})",
                units,
                cheapest.label(),
                quantity,
                free_quantity,
                required_quantity
            );
            outcome.results.push(
                AppliedDiscount::from_rule(&rule, reason, amount)
                    .on_product(cheapest.product_id)
                    .with_free_units(units),
            );
        }

        Ok(outcome)
    }
}
