//! 请求 DTO 定义

use campaign_engine::CampaignDraft;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;

/// 单次生成券码的数量上限
pub const MAX_BATCH_SIZE: i64 = 10_000;

/// 创建活动请求
///
/// 日期以 RFC 3339 字符串传入，格式错误时分别返回开始 / 结束时间错误
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 200, message = "活动名称长度必须在1-200个字符之间"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "折扣不能为负数"))]
    pub discount: f64,
    #[validate(range(min = 0, message = "名额不能为负数"))]
    pub max_users: i64,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

impl CreateCampaignRequest {
    /// 解析日期并转换为引擎输入
    pub fn into_draft(self) -> Result<CampaignDraft, ApiError> {
        let start_date = parse_rfc3339(&self.start_date).map_err(ApiError::InvalidStartDate)?;
        let end_date = parse_rfc3339(&self.end_date).map_err(ApiError::InvalidEndDate)?;

        Ok(CampaignDraft {
            name: self.name,
            discount: self.discount,
            max_users: self.max_users,
            start_date,
            end_date,
            description: self.description,
        })
    }
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("{}: {}", value, e))
}

/// 批量生成券码请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVouchersRequest {
    #[validate(range(min = 1, max = 10000, message = "生成数量必须在1-10000之间"))]
    pub count: i64,
}

impl GenerateVouchersRequest {
    /// 校验通过后的数量
    pub fn batch_size(&self) -> u32 {
        self.count.clamp(0, MAX_BATCH_SIZE) as u32
    }
}

/// 核销券码请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RedeemVoucherRequest {
    #[validate(length(min = 1, message = "券码不能为空"))]
    pub code: String,
    #[serde(alias = "user_id")]
    #[validate(length(min = 1, message = "用户ID不能为空"))]
    pub user_id: String,
}

/// 切换语言请求
#[derive(Debug, Deserialize, Validate)]
pub struct SetLanguageRequest {
    #[validate(length(min = 1, max = 16, message = "语言代码长度必须在1-16个字符之间"))]
    pub language: String,
}
