// src/stats/recorder.rs
//! 统计记录器接口 - 定义统一统计API

use std::{sync::Arc, time::Duration};

use crate::{
    stats::operation::{
        AtomicOperationStats, DisabledOperationRecorder, OperationRecorder,
        OperationStatsSnapshot,
    },
    types::OperationType,
};

/// 统计记录器特征
pub trait StatsRecorder: Send + Sync {
    /// 记录操作
    fn record_operation(&self, op_type: OperationType, duration: Duration, hit: bool);

    /// 获取操作统计接口
    fn operation_stats(&self) -> &dyn OperationRecorder;

    /// 重置所有统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String;

    /// 获取操作统计快照
    fn operation_stats_snapshot(&self) -> OperationStatsSnapshot;
}

/// 全局统计记录器实现
#[derive(Debug, Default)]
pub struct GlobalStatsRecorder {
    operation: AtomicOperationStats,
}

impl GlobalStatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsRecorder for GlobalStatsRecorder {
    fn record_operation(&self, op_type: OperationType, duration: Duration, hit: bool) {
        self.operation.record(op_type, duration, hit);
    }

    fn operation_stats(&self) -> &dyn OperationRecorder {
        &self.operation
    }

    fn reset(&self) {
        self.operation.reset();
    }

    fn export_prometheus(&self) -> String {
        self.operation.export_prometheus()
    }

    fn operation_stats_snapshot(&self) -> OperationStatsSnapshot {
        self.operation.snapshot()
    }
}

/// 统计记录器工厂
pub struct StatsRecorderFactory;

impl StatsRecorderFactory {
    /// 创建默认记录器
    pub fn create_default() -> Arc<dyn StatsRecorder> {
        Arc::new(GlobalStatsRecorder::new())
    }

    /// 创建禁用统计的记录器
    pub fn create_disabled() -> Arc<dyn StatsRecorder> {
        Arc::new(DisabledStatsRecorder)
    }

    /// 创建带自定义实现的记录器
    pub fn create_custom(operation: impl OperationRecorder + 'static) -> Arc<dyn StatsRecorder> {
        Arc::new(CustomStatsRecorder {
            operation: Box::new(operation),
        })
    }
}

/// 禁用统计的记录器
#[derive(Debug, Default)]
pub struct DisabledStatsRecorder;

impl StatsRecorder for DisabledStatsRecorder {
    fn record_operation(&self, _op_type: OperationType, _duration: Duration, _hit: bool) {}

    fn operation_stats(&self) -> &dyn OperationRecorder {
        &DisabledOperationRecorder
    }

    fn reset(&self) {}

    fn export_prometheus(&self) -> String {
        String::new()
    }

    fn operation_stats_snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot::default()
    }
}

/// 自定义统计记录器
struct CustomStatsRecorder {
    operation: Box<dyn OperationRecorder>,
}

impl StatsRecorder for CustomStatsRecorder {
    fn record_operation(&self, op_type: OperationType, duration: Duration, hit: bool) {
        self.operation.record(op_type, duration, hit);
    }

    fn operation_stats(&self) -> &dyn OperationRecorder {
        self.operation.as_ref()
    }

    fn reset(&self) {
        self.operation.reset();
    }

    fn export_prometheus(&self) -> String {
        self.operation.export_prometheus()
    }

    fn operation_stats_snapshot(&self) -> OperationStatsSnapshot {
        self.operation.snapshot()
    }
}
