//! Shared types for the discount engine
//!
//! Serializable domain models: discount rules (configuration), cart
//! snapshots (input) and analysis reports (output).

pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};
