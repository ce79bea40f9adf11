//! Discount Analysis Module
//!
//! Strategies evaluate one rule kind each; the manager runs them in a fixed
//! order against the same cart snapshot.

mod cheapest_percent;
mod free_piece;
pub mod manager;
pub mod money;
mod over_price;
pub mod strategy;

pub use cheapest_percent::CheapestPercentStrategy;
pub use free_piece::{FreePieceStrategy, free_units};
pub use manager::{AnalysisPolicy, DiscountManager, STRATEGY_ORDER};
pub use over_price::OverPricePercentStrategy;
pub use strategy::{DiscountStrategy, EvaluationContext, StrategyAction, StrategyOutcome};
