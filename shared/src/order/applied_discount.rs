//! Applied Discount - one line of a discount analysis report

use crate::models::discount_rule::{DiscountKind, DiscountRule};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Applied discount record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedDiscount {
    // === Rule Identity ===
    pub rule_id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_name: Option<String>,
    pub kind: DiscountKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,

    // === Calculation Info ===
    /// Human-readable explanation of why the rule fired
    pub reason: String,
    /// Amount saved, never negative
    pub amount: Decimal,
    /// Product the discount was taken from (category kinds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    /// Units waived (FREE_PIECE_BY_CATEGORY)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_units: Option<i64>,
}

impl AppliedDiscount {
    /// Create from a DiscountRule with calculated amount
    ///
    /// Strategies only produce non-negative amounts; a negative one is a bug.
    pub fn from_rule(rule: &DiscountRule, reason: impl Into<String>, amount: Decimal) -> Self {
        debug_assert!(
            amount >= Decimal::ZERO,
            "rule {} produced a negative discount amount {}",
            rule.id,
            amount
        );
        Self {
            rule_id: rule.id,
            name: rule.name.clone(),
            receipt_name: rule.receipt_name.clone(),
            kind: rule.kind,
            category_id: rule.category_id,
            reason: reason.into(),
            amount,
            product_id: None,
            free_units: None,
        }
    }

    pub fn on_product(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn with_free_units(mut self, free_units: i64) -> Self {
        self.free_units = Some(free_units);
        self
    }
}
