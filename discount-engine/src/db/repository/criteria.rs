//! Discount rule query criteria
//!
//! Criteria are a conjunction of equality filters. Unset fields match
//! everything.

use shared::models::{DiscountKind, DiscountRule};
use std::cmp::Ordering;
use std::fmt;

/// Equality filters over discount rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountCriteria {
    pub id: Option<i64>,
    pub kind: Option<DiscountKind>,
    pub category_id: Option<i64>,
    pub is_active: Option<bool>,
}

impl DiscountCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active rules of one kind (what every strategy asks for)
    pub fn active_of_kind(kind: DiscountKind) -> Self {
        Self::new().kind(kind).active(true)
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn kind(mut self, kind: DiscountKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn matches(&self, rule: &DiscountRule) -> bool {
        self.id.is_none_or(|id| rule.id == id)
            && self.kind.is_none_or(|kind| rule.kind == kind)
            && self
                .category_id
                .is_none_or(|cat| rule.category_id == Some(cat))
            && self.is_active.is_none_or(|active| rule.is_active == active)
    }
}

impl fmt::Display for DiscountCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(id) = self.id {
            parts.push(format!("id = {}", id));
        }
        if let Some(kind) = self.kind {
            parts.push(format!("kind = {}", kind));
        }
        if let Some(cat) = self.category_id {
            parts.push(format!("category = {}", cat));
        }
        if let Some(active) = self.is_active {
            parts.push(format!("active = {}", active));
        }

        if parts.is_empty() {
            f.write_str("any")
        } else {
            f.write_str(&parts.join(" AND "))
        }
    }
}

/// Sortable rule fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleField {
    Id,
    ThresholdAmount,
    Percentage,
    RequiredQuantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Result ordering for `find_one` / `find_many`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: RuleField,
    pub direction: SortDirection,
}

impl Default for OrderBy {
    fn default() -> Self {
        Self::asc(RuleField::Id)
    }
}

impl OrderBy {
    pub fn asc(field: RuleField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: RuleField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Compare two rules; equal keys fall back to ascending id
    pub fn compare(&self, a: &DiscountRule, b: &DiscountRule) -> Ordering {
        let ord = match self.field {
            RuleField::Id => a.id.cmp(&b.id),
            RuleField::ThresholdAmount => a.threshold_amount.cmp(&b.threshold_amount),
            RuleField::Percentage => a.percentage.cmp(&b.percentage),
            RuleField::RequiredQuantity => a.required_quantity.cmp(&b.required_quantity),
        };
        let ord = match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        ord.then_with(|| a.id.cmp(&b.id))
    }
}
