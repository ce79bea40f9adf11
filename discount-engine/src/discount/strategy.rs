//! Discount Strategy
//!
//! Each strategy implements `DiscountStrategy` and handles exactly one
//! `DiscountKind`. Strategies are pure: they read the snapshot and the store
//! and never write to either.

use enum_dispatch::enum_dispatch;
use rust_decimal::Decimal;
use shared::models::{DiscountKind, DiscountRule, DiscountTerms};
use shared::order::{AppliedDiscount, CartSnapshot};

use super::cheapest_percent::CheapestPercentStrategy;
use super::free_piece::FreePieceStrategy;
use super::money::round_money;
use super::over_price::OverPricePercentStrategy;
use crate::core::EngineResult;
use crate::db::{DiscountCriteria, DiscountStore};

/// Read-only inputs shared by every strategy during one analysis
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    snapshot: &'a CartSnapshot,
    grand_total: Decimal,
    stack_on_original: bool,
    saved_before: Decimal,
}

impl<'a> EvaluationContext<'a> {
    /// `saved_before` is what earlier strategies of this run already saved
    pub fn new(snapshot: &'a CartSnapshot, stack_on_original: bool, saved_before: Decimal) -> Self {
        Self {
            snapshot,
            grand_total: snapshot.grand_total(),
            stack_on_original,
            saved_before,
        }
    }

    pub fn snapshot(&self) -> &'a CartSnapshot {
        self.snapshot
    }

    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    pub fn saved_before(&self) -> Decimal {
        self.saved_before
    }

    /// Total that cart-wide percentages apply to.
    ///
    /// Stacking on the original always yields the grand total. Progressive
    /// stacking subtracts everything saved so far, `saved_here` being the
    /// calling strategy's own results, floored at zero.
    pub fn basis_total(&self, saved_here: Decimal) -> Decimal {
        if self.stack_on_original {
            self.grand_total
        } else {
            self.grand_total
                .saturating_sub(self.saved_before)
                .saturating_sub(saved_here)
                .max(Decimal::ZERO)
        }
    }

    /// Share of the cart still payable after earlier strategies, in [0, 1].
    ///
    /// Always 1 when stacking on the original.
    pub fn remaining_ratio(&self) -> Decimal {
        if self.stack_on_original || self.grand_total <= Decimal::ZERO {
            return Decimal::ONE;
        }
        self.basis_total(Decimal::ZERO) / self.grand_total
    }

    /// Round a line-level saving, scaled to the cart earlier strategies left
    pub fn line_saving(&self, raw: Decimal) -> Decimal {
        round_money(raw * self.remaining_ratio())
    }
}

/// Results of one strategy plus the malformed rules it skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyOutcome {
    pub results: Vec<AppliedDiscount>,
    pub skipped: Vec<i64>,
}

impl StrategyOutcome {
    /// Sum of the result amounts, saturating at `Decimal::MAX`
    pub fn saved(&self) -> Decimal {
        self.results
            .iter()
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.amount))
    }
}

#[enum_dispatch]
pub trait DiscountStrategy {
    /// The single rule kind this strategy evaluates
    fn kind(&self) -> DiscountKind;

    fn evaluate(
        &self,
        ctx: &EvaluationContext<'_>,
        store: &dyn DiscountStore,
    ) -> EngineResult<StrategyOutcome>;
}

/// StrategyAction enum - dispatches to the concrete strategies
///
/// Uses enum_dispatch for zero-cost static dispatch.
#[enum_dispatch(DiscountStrategy)]
#[derive(Debug, Clone)]
pub enum StrategyAction {
    OverPricePercent(OverPricePercentStrategy),
    FreePieceByCategory(FreePieceStrategy),
    CheapestPercentByCategory(CheapestPercentStrategy),
}

impl From<DiscountKind> for StrategyAction {
    fn from(kind: DiscountKind) -> Self {
        match kind {
            DiscountKind::OverPricePercent => OverPricePercentStrategy.into(),
            DiscountKind::FreePieceByCategory => FreePieceStrategy.into(),
            DiscountKind::CheapestPercentByCategory => CheapestPercentStrategy.into(),
        }
    }
}

/// Load the active rules of `kind` and check their terms.
///
/// Malformed rules are logged, recorded in `skipped` and left out; a store
/// failure aborts.
pub(crate) fn load_rules(
    store: &dyn DiscountStore,
    kind: DiscountKind,
    skipped: &mut Vec<i64>,
) -> EngineResult<Vec<(DiscountRule, DiscountTerms)>> {
    let rules = store
        .find_many(&DiscountCriteria::active_of_kind(kind), None, None, None)
        .inspect_err(|e| tracing::error!(kind = %kind, error = %e, "Failed to load discount rules"))?;

    let mut checked = Vec::with_capacity(rules.len());
    for rule in rules {
        // The store is external; do not trust it to have filtered
        if !rule.is_active || rule.kind != kind {
            continue;
        }

        match rule.terms() {
            Ok(terms) => checked.push((rule, terms)),
            Err(e) => {
                tracing::warn!(rule_id = rule.id, error = %e, "Skipping malformed discount rule");
                skipped.push(rule.id);
            }
        }
    }

    Ok(checked)
}
