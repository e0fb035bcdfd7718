//! HTTP 层错误类型定义
//!
//! 引擎错误按 [`ErrorKind`] 映射为状态码；响应中的 message 是文案键，
//! 由 [`crate::middleware::localize_errors`] 替换为当前语言的文案。

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campaign_engine::{EngineError, ErrorKind};

use crate::dto::ApiResponse;
use crate::reason;

/// HTTP 层错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("请求体格式错误: {0}")]
    InvalidFormat(String),

    #[error("请求参数无效: {0}")]
    InvalidRequest(String),

    #[error("开始时间格式无效: {0}")]
    InvalidStartDate(String),

    #[error("结束时间格式无效: {0}")]
    InvalidEndDate(String),

    #[error("不支持的语言: {0}")]
    UnsupportedLanguage(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// 附加在错误响应上的文案信息，供本地化中间件使用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorReason {
    pub code: &'static str,
    pub key: &'static str,
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFormat(_)
            | Self::InvalidRequest(_)
            | Self::InvalidStartDate(_)
            | Self::InvalidEndDate(_)
            | Self::UnsupportedLanguage(_) => StatusCode::BAD_REQUEST,
            Self::Engine(e) => match e.kind() {
                ErrorKind::BadInput => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFormat(_) => "INVALID_REQUEST_FORMAT",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::InvalidStartDate(_) => "INVALID_START_DATE",
            Self::InvalidEndDate(_) => "INVALID_END_DATE",
            Self::UnsupportedLanguage(_) => "UNSUPPORTED_LANGUAGE",
            // 系统错误不暴露内部错误码
            Self::Engine(e) if e.kind() == ErrorKind::Internal => "INTERNAL_ERROR",
            Self::Engine(e) => e.error_code(),
        }
    }

    /// 返回文案键
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::InvalidFormat(_) => reason::INVALID_REQUEST_FORMAT,
            Self::InvalidRequest(_) => reason::INVALID_REQUEST,
            Self::InvalidStartDate(_) => reason::INVALID_START_DATE,
            Self::InvalidEndDate(_) => reason::INVALID_END_DATE,
            Self::UnsupportedLanguage(_) => reason::UNSUPPORTED_LANGUAGE,
            Self::Engine(e) => match e {
                EngineError::Validation(_) => reason::INVALID_REQUEST,
                EngineError::InvalidRange { .. } => reason::INVALID_DATE_RANGE,
                EngineError::CampaignNotFound(_) => reason::CAMPAIGN_NOT_FOUND,
                EngineError::VoucherNotFound(_) => reason::VOUCHER_NOT_FOUND,
                EngineError::CapacityExceeded { .. } => reason::CAPACITY_EXCEEDED,
                EngineError::AlreadyUsed(_) => reason::VOUCHER_ALREADY_USED,
                EngineError::Expired(_) => reason::VOUCHER_EXPIRED,
                EngineError::DuplicateCode(_)
                | EngineError::Database(_)
                | EngineError::Persistence(_)
                | EngineError::Internal(_) => reason::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只记录日志，业务错误以 warn 记录
        if status.is_server_error() {
            tracing::error!(error = %self, "请求处理失败");
        } else {
            tracing::warn!(error = %self, "请求被拒绝");
        }

        let error_reason = ErrorReason {
            code: self.error_code(),
            key: self.message_key(),
        };

        let body = ApiResponse::<()>::error(error_reason.code, error_reason.key);
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(error_reason);
        response
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidRequest(errors.to_string())
    }
}

/// 请求体无法解析为 JSON 或字段类型不匹配
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidFormat(rejection.body_text())
    }
}

/// 路径参数无法解析（如非法 UUID）
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
