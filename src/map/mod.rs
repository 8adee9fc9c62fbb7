//! 哈希表核心模块 - 实现链式哈希表及其组件

pub mod bucket;
pub mod chain_map;

pub use bucket::{Bucket, ChainIter};
pub use chain_map::{ChainMap, ChainMapConfig, ChainMapStats, DEFAULT_CAPACITY};

use once_cell::sync::Lazy;

/// 全局默认配置
pub static DEFAULT_CONFIG: Lazy<ChainMapConfig> = Lazy::new(ChainMapConfig::default);
