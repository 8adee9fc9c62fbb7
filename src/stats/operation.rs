// src/stats/operation.rs
//! 操作统计 - 跟踪哈希表操作性能

use crate::types::OperationType;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

/// 操作统计接口
pub trait OperationRecorder: Send + Sync {
    /// 记录操作（hit表示键已存在）
    fn record(&self, op_type: OperationType, duration: Duration, hit: bool);

    /// 获取操作统计快照
    fn snapshot(&self) -> OperationStatsSnapshot;

    /// 重置统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String;
}

/// 操作统计快照
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationStatsSnapshot {
    pub get_count: u64,
    pub put_count: u64,
    pub delete_count: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub total_duration: u64, // 纳秒
}

/// 原子操作统计
///
/// 观测计数使用Relaxed原子操作，独立于表本身的互斥计数域。
#[derive(Debug, Default)]
pub struct AtomicOperationStats {
    get_count: AtomicU64,
    put_count: AtomicU64,
    delete_count: AtomicU64,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
    total_duration: AtomicU64, // 纳秒
}

impl AtomicOperationStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, op_type: OperationType) -> &AtomicU64 {
        match op_type {
            OperationType::Get => &self.get_count,
            OperationType::Put => &self.put_count,
            OperationType::Delete => &self.delete_count,
        }
    }
}

impl OperationRecorder for AtomicOperationStats {
    fn record(&self, op_type: OperationType, duration: Duration, hit: bool) {
        self.counter(op_type).fetch_add(1, Ordering::Relaxed);
        self.total_duration
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);

        if hit {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
        } else {
            self.miss_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot {
            get_count: self.get_count.load(Ordering::Relaxed),
            put_count: self.put_count.load(Ordering::Relaxed),
            delete_count: self.delete_count.load(Ordering::Relaxed),
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            total_duration: self.total_duration.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.get_count.store(0, Ordering::Relaxed);
        self.put_count.store(0, Ordering::Relaxed);
        self.delete_count.store(0, Ordering::Relaxed);
        self.hit_count.store(0, Ordering::Relaxed);
        self.miss_count.store(0, Ordering::Relaxed);
        self.total_duration.store(0, Ordering::Relaxed);
    }

    fn export_prometheus(&self) -> String {
        let mut output = String::new();

        let op_types = [
            OperationType::Get,
            OperationType::Put,
            OperationType::Delete,
        ];

        for op in op_types {
            let count = self.counter(op).load(Ordering::Relaxed);
            output.push_str(&format!(
                "# HELP chained_operation_{}_count Total {} operations\n",
                op.as_str(),
                op.as_str()
            ));
            output.push_str(&format!(
                "# TYPE chained_operation_{}_count counter\n",
                op.as_str()
            ));
            output.push_str(&format!(
                "chained_operation_{}_count {}\n",
                op.as_str(),
                count
            ));
        }

        output.push_str("# HELP chained_operation_total_duration Total operation duration (ns)\n");
        output.push_str("# TYPE chained_operation_total_duration counter\n");
        output.push_str(&format!(
            "chained_operation_total_duration {}\n",
            self.total_duration.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP chained_operation_hit_count Total hit count\n");
        output.push_str("# TYPE chained_operation_hit_count counter\n");
        output.push_str(&format!(
            "chained_operation_hit_count {}\n",
            self.hit_count.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP chained_operation_miss_count Total miss count\n");
        output.push_str("# TYPE chained_operation_miss_count counter\n");
        output.push_str(&format!(
            "chained_operation_miss_count {}\n",
            self.miss_count.load(Ordering::Relaxed)
        ));

        output
    }
}

/// 禁用操作统计实现
#[derive(Debug, Default)]
pub struct DisabledOperationRecorder;

impl OperationRecorder for DisabledOperationRecorder {
    fn record(&self, _op_type: OperationType, _duration: Duration, _hit: bool) {}
    fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot::default()
    }
    fn reset(&self) {}
    fn export_prometheus(&self) -> String {
        String::new()
    }
}
