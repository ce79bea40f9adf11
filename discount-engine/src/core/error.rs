use crate::db::StoreError;
use shared::order::SnapshotError;
use thiserror::Error;

/// Errors that abort a discount analysis
#[derive(Error, Debug)]
pub enum EngineError {
    /// The configuration store could not be queried
    #[error("Configuration lookup failed: {0}")]
    ConfigurationLookup(#[from] StoreError),

    /// The caller handed over a snapshot with negative or overflowing values
    #[error("Invalid cart snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    #[error("Cart snapshot unavailable: {0}")]
    SnapshotUnavailable(#[source] anyhow::Error),

    /// The discounts of one run add up past the representable amount
    #[error("Discount total exceeds the representable amount")]
    AmountOverflow,
}

/// Engine 的 Result 类型别名
pub type EngineResult<T> = std::result::Result<T, EngineError>;
