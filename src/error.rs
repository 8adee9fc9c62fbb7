//! 统一错误处理 - 所有可能错误类型和恢复逻辑

/// 链式哈希表可能发生的错误
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChainMapError {
    #[error("容量必须大于零")]
    ZeroCapacity,

    #[error("无效桶索引 (索引: {index}, 容量: {capacity})")]
    BucketIndexOutOfRange {
        index: usize,
        capacity: usize,
    },
}

impl ChainMapError {
    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ZeroCapacity => Some("使用大于零的容量重新创建表"),
            Self::BucketIndexOutOfRange { .. } => Some("验证桶索引是否小于表容量"),
        }
    }

    /// 判断错误是否可恢复
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ZeroCapacity | Self::BucketIndexOutOfRange { .. }
        )
    }

    /// 判断错误是否由配置引起
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ZeroCapacity)
    }
}
