//! 活动实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 促销活动
///
/// 有效期为左闭右开区间 `[start_date, end_date)`，`used_users` 记录已发放的名额
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    /// 折扣值
    pub discount: f64,
    /// 最大可发放名额
    pub max_users: i64,
    /// 已占用名额
    pub used_users: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// 剩余名额，不会小于 0
    pub fn remaining_capacity(&self) -> i64 {
        (self.max_users - self.used_users).max(0)
    }
}

/// 创建活动的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    pub name: String,
    pub discount: f64,
    pub max_users: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

impl CampaignDraft {
    /// 时间范围是否合法（开始时间严格早于结束时间）
    pub fn has_valid_range(&self) -> bool {
        self.start_date < self.end_date
    }

    /// 生成待持久化的活动，`used_users` 从 0 开始
    pub fn into_campaign(self, now: DateTime<Utc>) -> Campaign {
        Campaign {
            id: Uuid::now_v7(),
            name: self.name,
            discount: self.discount,
            max_users: self.max_users,
            used_users: 0,
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}
