//! 响应 DTO 定义

use campaign_engine::Campaign;
use serde::Serialize;

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self::success_with_message(data, "OK")
    }

    /// 创建成功响应（自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// 创建错误响应
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }
}

/// 活动响应 DTO，附带剩余名额
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDto {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub remaining_capacity: i64,
}

impl From<Campaign> for CampaignDto {
    fn from(campaign: Campaign) -> Self {
        let remaining_capacity = campaign.remaining_capacity();
        Self {
            campaign,
            remaining_capacity,
        }
    }
}

/// 当前语言
#[derive(Debug, Clone, Serialize)]
pub struct LanguageDto {
    pub language: String,
}
