//! 链式哈希表核心实现

use crate::{
    error::ChainMapError,
    map::bucket::Bucket,
    stats::recorder::{StatsRecorder, StatsRecorderFactory},
    types::{BucketSnapshot, Key, OperationType, Value},
};
use crossbeam_utils::CachePadded;
use parking_lot::Mutex;
use std::{fmt, io, sync::Arc, time::Instant};

/// 默认桶数量
pub const DEFAULT_CAPACITY: usize = 1024;

/// 哈希表配置
#[derive(Clone, Debug)]
pub struct ChainMapConfig {
    /// 桶数量（创建后不可变更）
    pub capacity: usize,
}

impl Default for ChainMapConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ChainMapConfig {
    /// 校验配置合法性
    pub fn validate(&self) -> Result<(), ChainMapError> {
        if self.capacity == 0 {
            return Err(ChainMapError::ZeroCapacity);
        }
        Ok(())
    }
}

/// 哈希表统计信息
#[derive(Debug, Default, Clone)]
pub struct ChainMapStats {
    pub size: usize,
    pub capacity: usize,
    pub load_factor: f32,
    pub num_ops: u64,
    pub get_count: u64,
    pub put_count: u64,
    pub delete_count: u64,
    pub hit_count: u64,
    pub miss_count: u64,
}

/// 线程安全链式哈希表
///
/// 桶数组在创建时一次分配，此后容量不变。每个桶持有独立互斥锁，
/// 不同桶上的操作完全并行。条目数与操作总数各自由专用锁保护，
/// 计数更新在桶锁释放之后进行，桶锁与计数锁从不嵌套。
pub struct ChainMap<V: Value> {
    // 桶数组，锁与链表按下标一一对应
    buckets: Box<[CachePadded<Mutex<Bucket<V>>>]>,
    // 配置
    config: ChainMapConfig,
    // 当前条目数，独立锁域，并发期间瞬时可为负
    entries: Mutex<i64>,
    // 已完成操作总数，独立锁域
    num_ops: Mutex<u64>,
    // 统计记录器
    recorder: Arc<dyn StatsRecorder>,
}

impl<V: Value> ChainMap<V> {
    /// 创建新哈希表
    pub fn new(
        config: ChainMapConfig,
        recorder: Arc<dyn StatsRecorder>,
    ) -> Result<Self, ChainMapError> {
        config.validate()?;
        Ok(Self::build(config, recorder))
    }

    /// 以指定容量创建，使用独立的默认统计记录器
    pub fn with_capacity(capacity: usize) -> Result<Self, ChainMapError> {
        Self::new(
            ChainMapConfig { capacity },
            StatsRecorderFactory::create_default(),
        )
    }

    // 构造桶数组与计数器，调用方已完成配置校验
    fn build(config: ChainMapConfig, recorder: Arc<dyn StatsRecorder>) -> Self {
        let buckets = (0..config.capacity)
            .map(|_| CachePadded::new(Mutex::new(Bucket::new())))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        log_debug!("chain map created, capacity={}", config.capacity);

        Self {
            buckets,
            config,
            entries: Mutex::new(0),
            num_ops: Mutex::new(0),
            recorder,
        }
    }

    /// 计算键所属的桶索引
    ///
    /// 欧几里得取余，负键同样映射到 `0..capacity`。
    fn bucket_index(&self, key: Key) -> usize {
        key.rem_euclid(self.config.capacity as i64) as usize
    }

    /// 查询指定键的值
    ///
    /// 未命中返回 `None`，与命中一样计入操作总数。
    pub fn get(&self, key: Key) -> Option<V> {
        let start = Instant::now();
        let index = self.bucket_index(key);

        let result = {
            let bucket = self.buckets[index].lock();
            bucket.get(key)
        };

        self.bump_ops();
        self.recorder
            .record_operation(OperationType::Get, start.elapsed(), result.is_some());
        result
    }

    /// 写入键值对
    ///
    /// 键已存在时原地更新并返回旧值，否则插入新条目返回 `None`。
    /// 仅新增条目使条目数加一，更新不改变条目数。
    pub fn put(&self, key: Key, value: V) -> Option<V> {
        let start = Instant::now();
        let index = self.bucket_index(key);

        let previous = {
            let mut bucket = self.buckets[index].lock();
            bucket.put(key, value)
        };

        // 桶锁已释放，先更新条目数再更新操作总数
        if previous.is_none() {
            self.incr_entries();
        }
        self.bump_ops();
        self.recorder
            .record_operation(OperationType::Put, start.elapsed(), previous.is_some());
        previous
    }

    /// 删除指定键的条目，返回其值
    ///
    /// 命中时条目数减一，未命中仅计入操作总数。
    pub fn delete(&self, key: Key) -> Option<V> {
        let start = Instant::now();
        let index = self.bucket_index(key);

        let removed = {
            let mut bucket = self.buckets[index].lock();
            bucket.remove(key)
        };

        if removed.is_some() {
            self.decr_entries();
        }
        self.bump_ops();
        self.recorder
            .record_operation(OperationType::Delete, start.elapsed(), removed.is_some());
        removed
    }

    // 条目数加一，独立临界区
    fn incr_entries(&self) {
        let mut entries = self.entries.lock();
        *entries += 1;
    }

    // 条目数减一，独立临界区
    fn decr_entries(&self) {
        let mut entries = self.entries.lock();
        *entries -= 1;
    }

    // 操作总数加一，任何操作收尾时调用一次
    fn bump_ops(&self) {
        let mut ops = self.num_ops.lock();
        *ops += 1;
    }

    /// 当前条目数
    ///
    /// 计数更新与桶内修改分处两个临界区，并发期间为近似值，
    /// 所有线程静止后精确。
    pub fn len(&self) -> usize {
        let entries = self.entries.lock();
        (*entries).max(0) as usize
    }

    /// 检查表是否为空
    pub fn is_empty(&self) -> bool {
        *self.entries.lock() <= 0
    }

    /// 桶数量
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// 已完成操作总数
    pub fn op_count(&self) -> u64 {
        *self.num_ops.lock()
    }

    /// 负载因子（条目数/桶数）
    pub fn load_factor(&self) -> f32 {
        self.len() as f32 / self.config.capacity as f32
    }

    /// 获取单个桶的快照
    ///
    /// 仅锁定目标桶，快照反映该桶在加锁瞬间的内容。
    pub fn bucket_snapshot(&self, index: usize) -> Result<BucketSnapshot<V>, ChainMapError> {
        if index >= self.config.capacity {
            return Err(ChainMapError::BucketIndexOutOfRange {
                index,
                capacity: self.config.capacity,
            });
        }

        let bucket = self.buckets[index].lock();
        let entries = bucket.iter().map(|(k, v)| (k, v.clone())).collect();
        Ok(BucketSnapshot { index, entries })
    }

    /// 打印整表内容到标准输出
    ///
    /// 每桶一行，格式为 `[i] -> (k,v) -> (k,v)`。
    pub fn dump(&self)
    where
        V: fmt::Display,
    {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        // 标准输出写入失败时忽略
        let _ = self.dump_to(&mut handle);
    }

    /// 将整表内容写入指定输出
    ///
    /// 逐桶短暂加锁，每行在桶内一致，整表不构成原子快照。
    pub fn dump_to<W: io::Write>(&self, out: &mut W) -> io::Result<()>
    where
        V: fmt::Display,
    {
        for (index, slot) in self.buckets.iter().enumerate() {
            let bucket = slot.lock();
            write!(out, "[{}] -> ", index)?;
            let mut first = true;
            for (key, value) in bucket.iter() {
                if !first {
                    write!(out, " -> ")?;
                }
                write!(out, "({},{})", key, value)?;
                first = false;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// 获取统计信息
    pub fn stats(&self) -> ChainMapStats {
        let op_stats = self.recorder.operation_stats_snapshot();

        ChainMapStats {
            size: self.len(),
            capacity: self.config.capacity,
            load_factor: self.load_factor(),
            num_ops: self.op_count(),
            get_count: op_stats.get_count,
            put_count: op_stats.put_count,
            delete_count: op_stats.delete_count,
            hit_count: op_stats.hit_count,
            miss_count: op_stats.miss_count,
        }
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        self.recorder.export_prometheus()
    }
}

impl<V: Value> Default for ChainMap<V> {
    fn default() -> Self {
        // 默认配置容量大于零，无需再次校验
        Self::build(
            ChainMapConfig::default(),
            StatsRecorderFactory::create_default(),
        )
    }
}

impl<V: Value> fmt::Debug for ChainMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainMap")
            .field("size", &self.len())
            .field("capacity", &self.config.capacity)
            .field("num_ops", &self.op_count())
            .finish()
    }
}
