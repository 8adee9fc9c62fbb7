//! 核心类型定义 - 共享类型和接口

/// 键类型 - 有符号64位整数
pub type Key = i64;

/// 值类型 - 要求可克隆并可跨线程发送
pub trait Value: Clone + Send + 'static {}

impl<T: Clone + Send + 'static> Value for T {}

/// 操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// 获取操作
    Get,
    /// 写入操作
    Put,
    /// 删除操作
    Delete,
}

impl OperationType {
    /// 判断是否为读操作
    pub fn is_read(&self) -> bool {
        matches!(self, OperationType::Get)
    }

    /// 判断是否为写操作
    pub fn is_write(&self) -> bool {
        matches!(self, OperationType::Put | OperationType::Delete)
    }

    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Get => "get",
            OperationType::Put => "put",
            OperationType::Delete => "delete",
        }
    }
}

/// 桶快照
///
/// 条目按链表顺序排列，链头在前。
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSnapshot<V> {
    pub index: usize,
    pub entries: Vec<(Key, V)>,
}

impl<V> BucketSnapshot<V> {
    /// 链表长度
    pub fn chain_len(&self) -> usize {
        self.entries.len()
    }

    /// 检查快照中是否包含指定键
    pub fn contains_key(&self, key: Key) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_classification() {
        assert!(OperationType::Get.is_read());
        assert!(!OperationType::Get.is_write());
        assert!(OperationType::Put.is_write());
        assert!(OperationType::Delete.is_write());
        assert!(!OperationType::Delete.is_read());
    }

    #[test]
    fn test_operation_as_str() {
        assert_eq!(OperationType::Get.as_str(), "get");
        assert_eq!(OperationType::Put.as_str(), "put");
        assert_eq!(OperationType::Delete.as_str(), "delete");
    }

    #[test]
    fn test_bucket_snapshot_helpers() {
        let snapshot = BucketSnapshot {
            index: 3,
            entries: vec![(19, "a"), (3, "b")],
        };
        assert_eq!(snapshot.chain_len(), 2);
        assert!(snapshot.contains_key(19));
        assert!(snapshot.contains_key(3));
        assert!(!snapshot.contains_key(11));
    }
}
