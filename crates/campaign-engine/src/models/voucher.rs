//! 券码实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::campaign::Campaign;

/// 一次性券码
///
/// 状态只有两种：未使用 -> 已使用（终态）。过期是由 `expiry_date` 和当前时间推导出的谓词，不落库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: Uuid,
    /// 全局唯一券码
    pub code: String,
    pub campaign_id: Uuid,
    pub used: bool,
    /// 核销用户，未核销时为空
    #[sqlx(default)]
    pub user_id: Option<String>,
    /// 过期时间，生成时取自活动的 end_date
    pub expiry_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Voucher {
    /// 为活动创建一张未使用的券码
    pub fn issue(code: String, campaign: &Campaign, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            code,
            campaign_id: campaign.id,
            used: false,
            user_id: None,
            expiry_date: campaign.end_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// 是否已过期
    ///
    /// 过期时间恰好等于 now 时仍然有效
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date < now
    }

    /// 标记为已使用
    pub fn redeem(&mut self, user_id: &str, now: DateTime<Utc>) {
        self.used = true;
        self.user_id = Some(user_id.to_string());
        self.updated_at = now;
    }
}
