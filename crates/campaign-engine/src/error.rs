//! 活动引擎错误类型
//!
//! 定义活动创建、券码生成、券码核销的业务错误和存储错误。
//! 错误不携带任何传输层概念，调用方通过 [`EngineError::kind`] 自行映射状态码。

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// 错误大类
///
/// HTTP 层据此决定状态码：BadInput -> 400，NotFound -> 404，Conflict -> 409，Internal -> 500
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadInput,
    NotFound,
    Conflict,
    Internal,
}

/// 活动引擎错误类型
#[derive(Debug, Error)]
pub enum EngineError {
    // === 参数校验 ===
    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("活动时间范围无效: start={start}, end={end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    // === 资源不存在 ===
    #[error("活动不存在: {0}")]
    CampaignNotFound(Uuid),

    #[error("券码不存在: {0}")]
    VoucherNotFound(String),

    // === 业务冲突 ===
    #[error("活动剩余名额不足: 需要 {requested}, 可用 {available}")]
    CapacityExceeded { requested: i64, available: i64 },

    #[error("券码已被使用: {0}")]
    AlreadyUsed(String),

    #[error("券码已过期: {0}")]
    Expired(String),

    // === 存储错误 ===
    #[error("券码重复: {0}")]
    DuplicateCode(String),

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("持久化失败: {0}")]
    Persistence(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 活动引擎 Result 类型别名
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// 错误大类
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidRange { .. } => ErrorKind::BadInput,
            Self::CampaignNotFound(_) | Self::VoucherNotFound(_) => ErrorKind::NotFound,
            Self::CapacityExceeded { .. } | Self::AlreadyUsed(_) | Self::Expired(_) => {
                ErrorKind::Conflict
            }
            Self::DuplicateCode(_)
            | Self::Database(_)
            | Self::Persistence(_)
            | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// 是否属于持久化失败（存储 I/O 或约束冲突）
    pub fn is_persistence_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateCode(_) | Self::Database(_) | Self::Persistence(_)
        )
    }

    /// 检查是否为可重试的错误
    ///
    /// 引擎本身从不重试，由调用方决定
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Persistence(_))
    }

    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidRange { .. } => "INVALID_DATE_RANGE",
            Self::CampaignNotFound(_) => "CAMPAIGN_NOT_FOUND",
            Self::VoucherNotFound(_) => "VOUCHER_NOT_FOUND",
            Self::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            Self::AlreadyUsed(_) => "VOUCHER_ALREADY_USED",
            Self::Expired(_) => "VOUCHER_EXPIRED",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
