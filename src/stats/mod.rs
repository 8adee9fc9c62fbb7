//! 统计模块 - 统一管理哈希表性能指标

pub mod operation;
pub mod recorder;

use std::{sync::Arc, time::Duration};

pub use operation::{
    AtomicOperationStats, DisabledOperationRecorder, OperationRecorder, OperationStatsSnapshot,
};
pub use recorder::{
    DisabledStatsRecorder, GlobalStatsRecorder, StatsRecorder, StatsRecorderFactory,
};

use crate::types::OperationType;

/// 全局统计记录器
pub static GLOBAL_STATS: once_cell::sync::Lazy<Arc<dyn StatsRecorder>> =
    once_cell::sync::Lazy::new(|| Arc::new(GlobalStatsRecorder::new()));

/// 记录操作统计
pub fn record_operation(op_type: OperationType, duration: Duration, hit: bool) {
    GLOBAL_STATS.record_operation(op_type, duration, hit);
}

/// 获取操作统计快照
pub fn operation_snapshot() -> OperationStatsSnapshot {
    GLOBAL_STATS.operation_stats().snapshot()
}

/// 重置所有统计
pub fn reset_stats() {
    GLOBAL_STATS.reset();
}

/// 导出Prometheus格式指标
pub fn export_prometheus() -> String {
    GLOBAL_STATS.export_prometheus()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 全局记录器为进程级单例，相关断言集中在一个用例内
    #[test]
    fn test_global_stats_roundtrip() {
        reset_stats();
        record_operation(OperationType::Put, Duration::from_nanos(120), false);
        record_operation(OperationType::Get, Duration::from_nanos(80), true);
        record_operation(OperationType::Delete, Duration::from_nanos(50), false);

        let snapshot = operation_snapshot();
        assert_eq!(snapshot.put_count, 1);
        assert_eq!(snapshot.get_count, 1);
        assert_eq!(snapshot.delete_count, 1);
        assert_eq!(snapshot.hit_count, 1);
        assert_eq!(snapshot.miss_count, 2);
        assert_eq!(snapshot.total_duration, 250);

        let metrics = export_prometheus();
        assert!(metrics.contains("chained_operation_put_count 1"));
        assert!(metrics.contains("chained_operation_get_count 1"));
        assert!(metrics.contains("chained_operation_delete_count 1"));
        assert!(metrics.contains("chained_operation_hit_count 1"));
        assert!(metrics.contains("chained_operation_total_duration 250"));

        reset_stats();
        assert_eq!(operation_snapshot(), OperationStatsSnapshot::default());
    }
}
