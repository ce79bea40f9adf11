//! Services

pub mod cart_provider;
pub mod discount_service;

pub use cart_provider::CartSnapshotProvider;
pub use discount_service::DiscountService;
