//! Cart and Analysis Module
//!
//! - Cart snapshot: read-only input of one analysis
//! - Applied discounts: one line per rule that fired
//! - Analysis report: ordered applied discounts plus totals

pub mod analysis_report;
pub mod applied_discount;
pub mod cart;

// Re-exports
pub use analysis_report::{AnalysisReport, ReportError};
pub use applied_discount::AppliedDiscount;
pub use cart::{CartLine, CartSnapshot, SnapshotError};
