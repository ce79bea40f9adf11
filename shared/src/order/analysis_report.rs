//! Analysis Report - itemized output of one discount analysis run

use super::applied_discount::AppliedDiscount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discount analysis report
///
/// `total_saved` is only ever derived from `results`, so the two cannot
/// disagree. `effective_saved` is `total_saved` after the cap policy.
/// Deserialization re-derives both and rejects reports that disagree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "ReportWire")]
pub struct AnalysisReport {
    results: Vec<AppliedDiscount>,
    grand_total: Decimal,
    total_saved: Decimal,
    effective_saved: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    skipped_rules: Vec<i64>,
}

impl AnalysisReport {
    /// Build a report, capping `effective_saved` at `grand_total` when asked
    pub fn new(
        grand_total: Decimal,
        results: Vec<AppliedDiscount>,
        skipped_rules: Vec<i64>,
        cap_at_grand_total: bool,
    ) -> Self {
        let total_saved: Decimal = results.iter().map(|r| r.amount).sum();
        let effective_saved = if cap_at_grand_total {
            total_saved.min(grand_total.max(Decimal::ZERO))
        } else {
            total_saved
        };

        Self {
            results,
            grand_total,
            total_saved,
            effective_saved,
            skipped_rules,
        }
    }

    pub fn empty(grand_total: Decimal) -> Self {
        Self::new(grand_total, vec![], vec![], false)
    }

    pub fn results(&self) -> &[AppliedDiscount] {
        &self.results
    }

    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    /// Sum of every result amount
    pub fn total_saved(&self) -> Decimal {
        self.total_saved
    }

    pub fn effective_saved(&self) -> Decimal {
        self.effective_saved
    }

    /// Ids of rules skipped as malformed during the run
    pub fn skipped_rules(&self) -> &[i64] {
        &self.skipped_rules
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Grand total minus the effective saving, floored at zero
    pub fn payable_total(&self) -> Decimal {
        (self.grand_total - self.effective_saved).max(Decimal::ZERO)
    }
}

/// Reasons a serialized report is rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("rule {rule_id}: negative discount amount {amount}")]
    NegativeAmount { rule_id: i64, amount: Decimal },

    #[error("total_saved {stated} does not match the sum of results {derived}")]
    TotalMismatch { stated: Decimal, derived: Decimal },

    #[error("effective_saved {stated} is neither the total nor the total capped at the grand total")]
    EffectiveMismatch { stated: Decimal },

    #[error("sum of result amounts overflows")]
    Overflow,
}

/// Serialized form, checked before it becomes an `AnalysisReport`
#[derive(Deserialize)]
struct ReportWire {
    results: Vec<AppliedDiscount>,
    grand_total: Decimal,
    total_saved: Decimal,
    effective_saved: Decimal,
    #[serde(default)]
    skipped_rules: Vec<i64>,
}

impl TryFrom<ReportWire> for AnalysisReport {
    type Error = ReportError;

    fn try_from(wire: ReportWire) -> Result<Self, Self::Error> {
        let mut derived = Decimal::ZERO;
        for result in &wire.results {
            if result.amount < Decimal::ZERO {
                return Err(ReportError::NegativeAmount {
                    rule_id: result.rule_id,
                    amount: result.amount,
                });
            }
            derived = derived
                .checked_add(result.amount)
                .ok_or(ReportError::Overflow)?;
        }
        if derived != wire.total_saved {
            return Err(ReportError::TotalMismatch {
                stated: wire.total_saved,
                derived,
            });
        }

        let capped = wire.effective_saved != derived;
        let report = Self::new(wire.grand_total, wire.results, wire.skipped_rules, capped);
        if report.effective_saved != wire.effective_saved {
            return Err(ReportError::EffectiveMismatch {
                stated: wire.effective_saved,
            });
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscountRule;
    use rust_decimal_macros::dec;

    fn applied(id: i64, amount: Decimal) -> AppliedDiscount {
        let rule = DiscountRule::over_price_percent(id, format!("rule_{}", id), dec!(0), dec!(10));
        AppliedDiscount::from_rule(&rule, "test", amount)
    }

    #[test]
    fn test_total_saved_is_sum_of_results() {
        let report = AnalysisReport::new(
            dec!(100),
            vec![applied(1, dec!(10)), applied(2, dec!(2.5)), applied(3, dec!(0))],
            vec![],
            false,
        );

        assert_eq!(report.results().len(), 3);
        assert_eq!(report.total_saved(), dec!(12.5));
        assert_eq!(report.effective_saved(), dec!(12.5));
        assert_eq!(report.payable_total(), dec!(87.5));
    }

    #[test]
    fn test_empty_report() {
        let report = AnalysisReport::empty(dec!(42));
        assert!(report.is_empty());
        assert_eq!(report.total_saved(), Decimal::ZERO);
        assert_eq!(report.grand_total(), dec!(42));
    }

    #[test]
    fn test_cap_only_affects_effective_saved() {
        let results = vec![applied(1, dec!(30)), applied(2, dec!(25))];

        let uncapped = AnalysisReport::new(dec!(50), results.clone(), vec![], false);
        assert_eq!(uncapped.total_saved(), dec!(55));
        assert_eq!(uncapped.effective_saved(), dec!(55));
        assert_eq!(uncapped.payable_total(), Decimal::ZERO);

        let capped = AnalysisReport::new(dec!(50), results, vec![], true);
        assert_eq!(capped.total_saved(), dec!(55));
        assert_eq!(capped.effective_saved(), dec!(50));
    }

    #[test]
    fn test_report_serialization() {
        let report = AnalysisReport::new(dec!(150), vec![applied(1, dec!(15))], vec![9], false);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["skipped_rules"][0], 9);
        assert_eq!(json["results"].as_array().unwrap().len(), 1);

        let back: AnalysisReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_capped_report_round_trips() {
        let report = AnalysisReport::new(
            dec!(50),
            vec![applied(1, dec!(30)), applied(2, dec!(25))],
            vec![],
            true,
        );
        let json = serde_json::to_string(&report).unwrap();
        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.effective_saved(), dec!(50));
        assert_eq!(back, report);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_totals() {
        let report = AnalysisReport::new(dec!(100), vec![applied(1, dec!(10))], vec![], false);

        let mut json = serde_json::to_value(&report).unwrap();
        json["total_saved"] = serde_json::json!(99);
        let err = serde_json::from_value::<AnalysisReport>(json).unwrap_err();
        assert!(err.to_string().contains("does not match the sum of results"));

        let mut json = serde_json::to_value(&report).unwrap();
        json["effective_saved"] = serde_json::json!(3);
        assert!(serde_json::from_value::<AnalysisReport>(json).is_err());

        let mut json = serde_json::to_value(&report).unwrap();
        json["results"][0]["amount"] = serde_json::json!(-10);
        json["total_saved"] = serde_json::json!(-10);
        json["effective_saved"] = serde_json::json!(-10);
        assert!(serde_json::from_value::<AnalysisReport>(json).is_err());
    }
}
