//! Cheapest-percent-by-category strategy
//!
//! Once enough units of a category are bought, X% off one unit of the
//! cheapest product in that category. Applied once per rule, not per batch.

use shared::models::{DiscountKind, DiscountTerms};
use shared::order::AppliedDiscount;

use super::money::{format_percent, percent_rate};
use super::strategy::{DiscountStrategy, EvaluationContext, StrategyOutcome, load_rules};
use crate::core::EngineResult;
use crate::db::DiscountStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestPercentStrategy;

impl DiscountStrategy for CheapestPercentStrategy {
    fn kind(&self) -> DiscountKind {
        DiscountKind::CheapestPercentByCategory
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
            let DiscountTerms::CheapestPercentByCategory {
                category_id,
                required_quantity,
                percentage,
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

            let amount = ctx.line_saving(cheapest.unit_price * percent_rate(percentage));
            let reason = format!(
                "{} off cheapest item {} ({} units bought, {} required)",
                format_percent(percentage),
                cheapest.label(),
                quantity,
                required_quantity
            );
            outcome.results.push(
                AppliedDiscount::from_rule(&rule, reason, amount).on_product(cheapest.product_id),
            );
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryDiscountStore;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use shared::models::DiscountRule;
    use shared::order::{CartLine, CartSnapshot};

    const TOYS: i64 = 7;

    fn run(store: &InMemoryDiscountStore, cart: &CartSnapshot) -> StrategyOutcome {
        let ctx = EvaluationContext::new(cart, true, Decimal::ZERO);
        CheapestPercentStrategy.evaluate(&ctx, store).unwrap()
    }

    fn toys_rule(required: i32, percentage: Decimal) -> InMemoryDiscountStore {
        InMemoryDiscountStore::new(vec![DiscountRule::cheapest_percent_by_category(
            1, "toys", TOYS, required, percentage,
        )])
    }

    fn toys_cart() -> CartSnapshot {
        CartSnapshot::new(vec![
            CartLine::new(5, TOYS, dec!(30), 1),
            CartLine::new(6, TOYS, dec!(12.50), 2),
            CartLine::new(7, TOYS, dec!(45), 2),
            CartLine::new(8, 1, dec!(2), 10),
        ])
    }

    #[test]
    fn test_discounts_cheapest_line_once() {
        let outcome = run(&toys_rule(5, dec!(20)), &toys_cart());
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].product_id, Some(6));
        assert_eq!(outcome.results[0].amount, dec!(2.50));
    }

    #[test]
    fn test_not_scaled_by_batches() {
        // 5 toys against a threshold of 1 still discounts a single unit
        let outcome = run(&toys_rule(1, dec!(20)), &toys_cart());
        assert_eq!(outcome.results[0].amount, dec!(2.50));
    }

    #[test]
    fn test_below_required_quantity_emits_nothing() {
        let cart = CartSnapshot::new(vec![
            CartLine::new(5, TOYS, dec!(30), 2),
            CartLine::new(6, TOYS, dec!(12.50), 2),
        ]);
        assert!(run(&toys_rule(5, dec!(20)), &cart).results.is_empty());
    }

    #[test]
    fn test_never_exceeds_percentage_of_max_price() {
        let cart = toys_cart();
        let max_price = cart
            .lines_in_category(TOYS)
            .map(|l| l.unit_price)
            .max()
            .unwrap();

        for pct in [dec!(0), dec!(1), dec!(12.5), dec!(20), dec!(50), dec!(99.99), dec!(100)] {
            let outcome = run(&toys_rule(1, pct), &cart);
            let bound = pct / Decimal::ONE_HUNDRED * max_price;
            assert!(outcome.results[0].amount <= bound, "pct={pct}");
        }
    }

    #[test]
    fn test_odd_cent_price_is_not_rounded_up() {
        // 12.5% of 33.33 is 4.16625
        let cart = CartSnapshot::new(vec![CartLine::new(1, TOYS, dec!(33.33), 1)]);
        let outcome = run(&toys_rule(1, dec!(12.5)), &cart);
        assert_eq!(outcome.results[0].amount, dec!(4.16));
        assert!(outcome.results[0].amount <= dec!(4.16625));
    }

    #[test]
    fn test_zero_percentage_yields_zero_amount_result() {
        let outcome = run(&toys_rule(1, dec!(0)), &toys_cart());
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].amount, Decimal::ZERO);
    }

    #[test]
    fn test_category_without_lines_emits_nothing() {
        let cart = CartSnapshot::new(vec![CartLine::new(1, 2, dec!(10), 9)]);
        assert!(run(&toys_rule(1, dec!(50)), &cart).results.is_empty());
    }
}
