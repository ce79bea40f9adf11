//! Discount Rule Model
//!
//! `DiscountRule` is the stored configuration row (flat, every field optional
//! except the kind). `DiscountTerms` is the checked, per-kind view that the
//! calculators work with.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Discount kind enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    /// Percentage off the whole cart once its total reaches a threshold
    OverPricePercent,
    /// Free units for every batch of units bought in a category
    FreePieceByCategory,
    /// Percentage off the cheapest product of a category
    CheapestPercentByCategory,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::OverPricePercent => "OVER_PRICE_PERCENT",
            DiscountKind::FreePieceByCategory => "FREE_PIECE_BY_CATEGORY",
            DiscountKind::CheapestPercentByCategory => "CHEAPEST_PERCENT_BY_CATEGORY",
        }
    }

    /// Whether rules of this kind must name a category
    pub fn is_category_scoped(&self) -> bool {
        !matches!(self, DiscountKind::OverPricePercent)
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_true() -> bool {
    true
}

/// Discount rule entity (折扣规则)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountRule {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_name: Option<String>,
    pub kind: DiscountKind,
    /// Target category (category-scoped kinds only)
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Minimum cart total to qualify (OVER_PRICE_PERCENT)
    #[serde(default)]
    pub threshold_amount: Option<Decimal>,
    /// Percentage value (10 = 10%)
    #[serde(default)]
    pub percentage: Option<Decimal>,
    /// Units that must be bought in the category to qualify
    #[serde(default)]
    pub required_quantity: Option<i32>,
    /// Units waived per qualifying batch (FREE_PIECE_BY_CATEGORY)
    #[serde(default)]
    pub free_quantity: Option<i32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl DiscountRule {
    fn blank(id: i64, name: impl Into<String>, kind: DiscountKind) -> Self {
        Self {
            id,
            name: name.into(),
            receipt_name: None,
            kind,
            category_id: None,
            threshold_amount: None,
            percentage: None,
            required_quantity: None,
            free_quantity: None,
            is_active: true,
        }
    }

    pub fn over_price_percent(
        id: i64,
        name: impl Into<String>,
        threshold_amount: Decimal,
        percentage: Decimal,
    ) -> Self {
        Self {
            threshold_amount: Some(threshold_amount),
            percentage: Some(percentage),
            ..Self::blank(id, name, DiscountKind::OverPricePercent)
        }
    }

    pub fn free_piece_by_category(
        id: i64,
        name: impl Into<String>,
        category_id: i64,
        required_quantity: i32,
        free_quantity: i32,
    ) -> Self {
        Self {
            category_id: Some(category_id),
            required_quantity: Some(required_quantity),
            free_quantity: Some(free_quantity),
            ..Self::blank(id, name, DiscountKind::FreePieceByCategory)
        }
    }

    pub fn cheapest_percent_by_category(
        id: i64,
        name: impl Into<String>,
        category_id: i64,
        required_quantity: i32,
        percentage: Decimal,
    ) -> Self {
        Self {
            category_id: Some(category_id),
            required_quantity: Some(required_quantity),
            percentage: Some(percentage),
            ..Self::blank(id, name, DiscountKind::CheapestPercentByCategory)
        }
    }

    /// Check the fields required by `kind` and build the typed terms
    pub fn terms(&self) -> Result<DiscountTerms, RuleError> {
        match self.kind {
            DiscountKind::OverPricePercent => {
                let threshold = self.require(self.threshold_amount, "threshold_amount")?;
                if threshold < Decimal::ZERO {
                    return Err(self.invalid("threshold_amount", "must be non-negative"));
                }
                Ok(DiscountTerms::OverPricePercent {
                    threshold,
                    percentage: self.checked_percentage()?,
                })
            }
            DiscountKind::FreePieceByCategory => {
                let free_quantity = self.require(self.free_quantity, "free_quantity")?;
                if free_quantity < 0 {
                    return Err(self.invalid("free_quantity", "must be non-negative"));
                }
                Ok(DiscountTerms::FreePieceByCategory {
                    category_id: self.require(self.category_id, "category_id")?,
                    required_quantity: self.checked_required_quantity()?,
                    free_quantity,
                })
            }
            DiscountKind::CheapestPercentByCategory => {
                Ok(DiscountTerms::CheapestPercentByCategory {
                    category_id: self.require(self.category_id, "category_id")?,
                    required_quantity: self.checked_required_quantity()?,
                    percentage: self.checked_percentage()?,
                })
            }
        }
    }

    fn require<T>(&self, value: Option<T>, field: &'static str) -> Result<T, RuleError> {
        value.ok_or(RuleError::MissingField {
            rule_id: self.id,
            kind: self.kind,
            field,
        })
    }

    fn invalid(&self, field: &'static str, reason: &str) -> RuleError {
        RuleError::InvalidField {
            rule_id: self.id,
            field,
            reason: reason.to_string(),
        }
    }

    fn checked_percentage(&self) -> Result<Decimal, RuleError> {
        let percentage = self.require(self.percentage, "percentage")?;
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(self.invalid("percentage", "must be between 0 and 100"));
        }
        Ok(percentage)
    }

    fn checked_required_quantity(&self) -> Result<i32, RuleError> {
        let required = self.require(self.required_quantity, "required_quantity")?;
        if required <= 0 {
            return Err(self.invalid("required_quantity", "must be positive"));
        }
        Ok(required)
    }
}

/// Checked per-kind payload of a discount rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountTerms {
    OverPricePercent {
        threshold: Decimal,
        percentage: Decimal,
    },
    FreePieceByCategory {
        category_id: i64,
        required_quantity: i32,
        free_quantity: i32,
    },
    CheapestPercentByCategory {
        category_id: i64,
        required_quantity: i32,
        percentage: Decimal,
    },
}

/// A stored rule that cannot be evaluated
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule {rule_id}: {kind} requires `{field}`")]
    MissingField {
        rule_id: i64,
        kind: DiscountKind,
        field: &'static str,
    },

    #[error("rule {rule_id}: invalid `{field}`: {reason}")]
    InvalidField {
        rule_id: i64,
        field: &'static str,
        reason: String,
    },
}

impl RuleError {
    pub fn rule_id(&self) -> i64 {
        match self {
            RuleError::MissingField { rule_id, .. } | RuleError::InvalidField { rule_id, .. } => {
                *rule_id
            }
        }
    }
}
