//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试。
//!
//! 名额占用和券码核销的并发正确性完全依赖这里的原子条件更新：
//! `reserve_capacity` 只在不超过上限时增加，`mark_redeemed` 只在未使用时成功。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Campaign, Voucher};

/// 活动仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepositoryTrait: Send + Sync {
    /// 插入活动，返回活动 ID
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<Uuid>;

    async fn get_campaign_by_id(&self, id: Uuid) -> Result<Option<Campaign>>;

    /// 无条件将 used_users 加 1
    ///
    /// 存储层接口，生成流程使用 `reserve_capacity` / `release_capacity`
    async fn increment_used_users(&self, id: Uuid) -> Result<()>;

    /// 原子占用名额
    ///
    /// 仅当 `used_users + count <= max_users` 时增加并返回 true，否则不做任何修改并返回 false
    async fn reserve_capacity(&self, id: Uuid, count: i64) -> Result<bool>;

    /// 归还名额，used_users 不会低于 0
    async fn release_capacity(&self, id: Uuid, count: i64) -> Result<()>;
}

/// 券码仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoucherRepositoryTrait: Send + Sync {
    /// 插入券码，券码冲突时返回 `DuplicateCode`
    async fn insert_voucher(&self, voucher: &Voucher) -> Result<()>;

    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>>;

    /// 覆盖写入 used、user_id 和 updated_at
    ///
    /// 存储层接口，核销流程使用条件写入 `mark_redeemed`
    async fn update_voucher(&self, voucher: &Voucher) -> Result<()>;

    /// 原子核销
    ///
    /// 仅当券码仍未使用时写入并返回 true；已被其他请求抢先核销时返回 false
    async fn mark_redeemed(&self, id: Uuid, user_id: &str, at: DateTime<Utc>) -> Result<bool>;

    async fn list_vouchers_by_campaign(&self, campaign_id: Uuid) -> Result<Vec<Voucher>>;
}
