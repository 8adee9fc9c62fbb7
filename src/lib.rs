//! 线程安全链式哈希表库
//!
//! 提供固定容量、桶级互斥锁的并发链式哈希表实现，多线程读写无需外部同步。
//!
//! ## 主要特性
//! - 每桶独立互斥锁，不同桶上的操作完全并行
//! - 条目数与操作总数各自独立锁域，静止后精确可审计
//! - 容量创建时固定，无扩容停顿
//! - 负键经欧几里得取余正确归桶
//! - 详细性能统计和监控
//!
//! ## 快速开始
//!
//! ```rust
//! use chained_hashtable::DefaultMap;
//!
//! let map = DefaultMap::with_capacity(16).expect("容量非法");
//!
//! // 写入键值对
//! map.put(1, 100);
//! map.put(5, 500);
//!
//! // 获取值
//! assert_eq!(map.get(1), Some(100));
//!
//! // 删除键
//! map.delete(1);
//! assert_eq!(map.get(1), None);
//!
//! // 打印统计信息
//! println!("{:?}", map.stats());
//! ```

#![warn(clippy::all)]

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}

// 核心模块导出
pub mod error;
pub mod types;
pub mod map;
pub mod stats;

// 公共接口导出
pub use crate::{
    error::ChainMapError,
    map::{
        Bucket,
        ChainIter,
        ChainMap,
        ChainMapConfig,
        ChainMapStats,
        DEFAULT_CAPACITY,
        DEFAULT_CONFIG,
    },
    stats::{
        export_prometheus,
        operation_snapshot,
        record_operation,
        reset_stats,
        AtomicOperationStats,
        DisabledStatsRecorder,
        GlobalStatsRecorder,
        OperationRecorder,
        OperationStatsSnapshot,
        StatsRecorder,
        StatsRecorderFactory,
    },
    types::{BucketSnapshot, Key, OperationType, Value},
};

// 简化默认类型别名
pub type DefaultMap = ChainMap<i64>;

// 便捷功能函数

/// 批量写入
///
/// 返回新增条目数，不含对已有键的更新。
pub fn batch_put<V: Value>(map: &ChainMap<V>, items: impl Iterator<Item = (Key, V)>) -> usize {
    let mut inserted = 0;
    for (key, value) in items {
        if map.put(key, value).is_none() {
            inserted += 1;
        }
    }
    inserted
}

/// 批量查询
///
/// 结果与键的顺序一一对应，未命中的位置为 `None`。
pub fn batch_get<V: Value>(map: &ChainMap<V>, keys: impl Iterator<Item = Key>) -> Vec<Option<V>> {
    keys.map(|key| map.get(key)).collect()
}
