//! Cart Snapshot - read-only view of the cart used for one discount analysis

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One product line of the cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl CartLine {
    pub fn new(
        product_id: i64,
        category_id: impl Into<Option<i64>>,
        unit_price: Decimal,
        quantity: i32,
    ) -> Self {
        Self {
            product_id,
            product_name: None,
            category_id: category_id.into(),
            unit_price,
            quantity,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// unit_price × quantity, saturating at `Decimal::MAX`
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// unit_price × quantity, `None` on overflow
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    /// Name for display, falling back to the product id
    pub fn label(&self) -> String {
        self.product_name
            .clone()
            .unwrap_or_else(|| format!("product {}", self.product_id))
    }
}

/// Contract violations in a snapshot handed to the engine
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("product {product_id}: quantity must be non-negative, got {quantity}")]
    NegativeQuantity { product_id: i64, quantity: i32 },

    #[error("product {product_id}: unit price must be non-negative, got {unit_price}")]
    NegativePrice { product_id: i64, unit_price: Decimal },

    #[error("product {product_id}: cart total exceeds the representable amount")]
    Overflow { product_id: i64 },
}

/// Immutable point-in-time view of the cart lines
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line totals.
    ///
    /// Saturates at `Decimal::MAX`; `validate` rejects such carts.
    pub fn grand_total(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.line_total()))
    }

    pub fn lines_in_category(&self, category_id: i64) -> impl Iterator<Item = &CartLine> {
        self.lines
            .iter()
            .filter(move |line| line.category_id == Some(category_id))
    }

    /// Units bought in a category, or `None` if no line belongs to it
    pub fn category_quantity(&self, category_id: i64) -> Option<i64> {
        self.lines_in_category(category_id)
            .map(|line| i64::from(line.quantity))
            .reduce(|a, b| a + b)
    }

    /// Cheapest bought line of a category.
    ///
    /// Ties on price go to the lowest product id. Lines with zero quantity
    /// are not candidates.
    pub fn cheapest_in_category(&self, category_id: i64) -> Option<&CartLine> {
        self.lines_in_category(category_id)
            .filter(|line| line.quantity > 0)
            .min_by(|a, b| {
                a.unit_price
                    .cmp(&b.unit_price)
                    .then_with(|| a.product_id.cmp(&b.product_id))
            })
    }

    /// Reject negative quantities and prices, and totals that overflow
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut total = Decimal::ZERO;
        for line in &self.lines {
            if line.quantity < 0 {
                return Err(SnapshotError::NegativeQuantity {
                    product_id: line.product_id,
                    quantity: line.quantity,
                });
            }
            if line.unit_price < Decimal::ZERO {
                return Err(SnapshotError::NegativePrice {
                    product_id: line.product_id,
                    unit_price: line.unit_price,
                });
            }
            total = line
                .checked_line_total()
                .and_then(|line_total| total.checked_add(line_total))
                .ok_or(SnapshotError::Overflow {
                    product_id: line.product_id,
                })?;
        }
        Ok(())
    }
}

impl FromIterator<CartLine> for CartSnapshot {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
