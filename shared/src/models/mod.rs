//! Data models
//!
//! Configuration records owned by the administrative side. All IDs are
//! `i64`.

pub mod discount_rule;

// Re-exports
pub use discount_rule::*;
