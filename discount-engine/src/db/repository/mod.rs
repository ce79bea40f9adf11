//! Repository Module
//!
//! Read-side contract of the discount configuration store. The engine only
//! ever reads; writes belong to the administrative path that owns the store.

pub mod criteria;
pub mod discount;

pub use criteria::{DiscountCriteria, OrderBy, RuleField, SortDirection};
pub use discount::InMemoryDiscountStore;

use shared::models::DiscountRule;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid rule data: {0}")]
    Invalid(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Invalid(err.to_string())
    }
}

/// Result type for repository operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Discount configuration store
///
/// Implementations must tolerate concurrent readers.
pub trait DiscountStore: Send + Sync {
    /// Rules matching `criteria`, ordered (ascending id by default) and paged.
    /// No match is an empty vec, never an error.
    fn find_many(
        &self,
        criteria: &DiscountCriteria,
        order_by: Option<OrderBy>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> StoreResult<Vec<DiscountRule>>;

    /// First rule matching `criteria`.
    ///
    /// Absence is `Ok(None)`, or `StoreError::NotFound` when
    /// `raise_on_absent` is set.
    fn find_one(
        &self,
        criteria: &DiscountCriteria,
        order_by: Option<OrderBy>,
        raise_on_absent: bool,
    ) -> StoreResult<Option<DiscountRule>> {
        let rule = self
            .find_many(criteria, order_by, Some(1), None)?
            .into_iter()
            .next();

        match rule {
            None if raise_on_absent => Err(StoreError::NotFound(format!(
                "discount rule where {}",
                criteria
            ))),
            other => Ok(other),
        }
    }
}
