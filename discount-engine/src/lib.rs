//! Discount Engine - 购物车折扣分析引擎
//!
//! # 架构概述
//!
//! Evaluates the configured discount rules against a cart snapshot and
//! returns an itemized `AnalysisReport`.
//!
//! - **配置存储** (`db`): rule lookups by criteria, in-memory implementation
//! - **折扣策略** (`discount`): one strategy per rule kind, run in a fixed order
//! - **服务** (`services`): cart snapshot provider and service facade
//!
//! # 模块结构
//!
//! ```text
//! discount-engine/src/
//! ├── core/          # 配置、错误
//! ├── db/            # 规则存储与查询条件
//! ├── discount/      # 策略与管理器
//! ├── services/      # 服务门面
//! └── utils/         # 日志
//! ```
//!
//! # 使用示例
//!
//! ```ignore
//! let store = Arc::new(InMemoryDiscountStore::from_json_file("rules.json")?);
//! let manager = DiscountManager::new(store, AnalysisPolicy::default());
//! let report = manager.analyze(&snapshot)?;
//! ```

pub mod core;
pub mod db;
pub mod discount;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use self::core::{EngineConfig, EngineError, EngineResult};
pub use db::{DiscountCriteria, DiscountStore, InMemoryDiscountStore, OrderBy, StoreError};
pub use discount::{AnalysisPolicy, DiscountManager};
pub use services::{CartSnapshotProvider, DiscountService};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
