use thiserror::Error;

/// 模拟平台错误类型定义
#[derive(Debug, Error)]
pub enum SentinelError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("数据库操作错误: {0}")]
    DatabaseOperation(String),

    #[error("节点未找到: {id}")]
    NodeNotFound { id: i64 },

    #[error("Pod未找到: {id}")]
    PodNotFound { id: i64 },

    #[error("混沌实验未找到: {id}")]
    ExperimentNotFound { id: i64 },

    #[error("商品未找到: {id}")]
    ProductNotFound { id: i64 },

    #[error("无效的状态转换: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("无效的输入: {0}")]
    InvalidInput(String),

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl SentinelError {
    /// 是否为资源不存在类错误
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SentinelError::NodeNotFound { .. }
                | SentinelError::PodNotFound { .. }
                | SentinelError::ExperimentNotFound { .. }
                | SentinelError::ProductNotFound { .. }
        )
    }
}

impl From<serde_json::Error> for SentinelError {
    fn from(err: serde_json::Error) -> Self {
        SentinelError::Serialization(err.to_string())
    }
}

/// 统一的Result类型
pub type SentinelResult<T> = std::result::Result<T, SentinelError>;
