//! Discount configuration storage

pub mod repository;

pub use repository::{
    DiscountCriteria, DiscountStore, InMemoryDiscountStore, OrderBy, RuleField, SortDirection,
    StoreError, StoreResult,
};
