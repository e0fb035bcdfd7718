//! 内存仓储
//!
//! 使用 DashMap 实现的高并发内存存储，适用于测试和开发环境。
//!
//! 条件更新都在单个 entry 的写锁内完成，与 PostgreSQL 实现提供相同的原子语义：
//! - 名额占用在 `get_mut` 持锁期间检查并修改
//! - 券码唯一性通过 code -> id 索引的 `entry` 占位保证

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use super::traits::{CampaignRepositoryTrait, VoucherRepositoryTrait};
use crate::error::{EngineError, Result};
use crate::models::{Campaign, Voucher};

/// 内存活动仓储
#[derive(Debug, Clone, Default)]
pub struct MemoryCampaignRepository {
    campaigns: Arc<DashMap<Uuid, Campaign>>,
}

impl MemoryCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 活动总数
    pub fn count(&self) -> usize {
        self.campaigns.len()
    }
}

#[async_trait]
impl CampaignRepositoryTrait for MemoryCampaignRepository {
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<Uuid> {
        match self.campaigns.entry(campaign.id) {
            Entry::Occupied(_) => Err(EngineError::Persistence(format!(
                "campaign {} already exists",
                campaign.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(campaign.clone());
                Ok(campaign.id)
            }
        }
    }

    async fn get_campaign_by_id(&self, id: Uuid) -> Result<Option<Campaign>> {
        Ok(self.campaigns.get(&id).map(|c| c.clone()))
    }

    async fn increment_used_users(&self, id: Uuid) -> Result<()> {
        let mut campaign = self
            .campaigns
            .get_mut(&id)
            .ok_or(EngineError::CampaignNotFound(id))?;
        campaign.used_users += 1;
        campaign.updated_at = Utc::now();
        Ok(())
    }

    async fn reserve_capacity(&self, id: Uuid, count: i64) -> Result<bool> {
        let Some(mut campaign) = self.campaigns.get_mut(&id) else {
            return Ok(false);
        };
        if campaign.used_users + count > campaign.max_users {
            return Ok(false);
        }
        campaign.used_users += count;
        campaign.updated_at = Utc::now();
        Ok(true)
    }

    async fn release_capacity(&self, id: Uuid, count: i64) -> Result<()> {
        let mut campaign = self
            .campaigns
            .get_mut(&id)
            .ok_or(EngineError::CampaignNotFound(id))?;
        campaign.used_users = (campaign.used_users - count).max(0);
        campaign.updated_at = Utc::now();
        Ok(())
    }
}

/// 内存券码仓储
#[derive(Debug, Clone, Default)]
pub struct MemoryVoucherRepository {
    vouchers: Arc<DashMap<Uuid, Voucher>>,
    /// code -> id 唯一索引
    codes: Arc<DashMap<String, Uuid>>,
}

impl MemoryVoucherRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 券码总数
    pub fn count(&self) -> usize {
        self.vouchers.len()
    }
}

#[async_trait]
impl VoucherRepositoryTrait for MemoryVoucherRepository {
    async fn insert_voucher(&self, voucher: &Voucher) -> Result<()> {
        match self.codes.entry(voucher.code.clone()) {
            Entry::Occupied(_) => Err(EngineError::DuplicateCode(voucher.code.clone())),
            Entry::Vacant(slot) => {
                // 先写实体再释放索引锁，读者不会看到悬空索引
                self.vouchers.insert(voucher.id, voucher.clone());
                slot.insert(voucher.id);
                Ok(())
            }
        }
    }

    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>> {
        let Some(id) = self.codes.get(code).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.vouchers.get(&id).map(|v| v.clone()))
    }

    async fn update_voucher(&self, voucher: &Voucher) -> Result<()> {
        let mut stored = self
            .vouchers
            .get_mut(&voucher.id)
            .ok_or_else(|| EngineError::VoucherNotFound(voucher.code.clone()))?;
        stored.used = voucher.used;
        stored.user_id = voucher.user_id.clone();
        stored.updated_at = voucher.updated_at;
        Ok(())
    }

    async fn mark_redeemed(&self, id: Uuid, user_id: &str, at: DateTime<Utc>) -> Result<bool> {
        let Some(mut stored) = self.vouchers.get_mut(&id) else {
            return Ok(false);
        };
        if stored.used {
            return Ok(false);
        }
        stored.redeem(user_id, at);
        Ok(true)
    }

    async fn list_vouchers_by_campaign(&self, campaign_id: Uuid) -> Result<Vec<Voucher>> {
        let mut vouchers: Vec<Voucher> = self
            .vouchers
            .iter()
            .filter(|entry| entry.value().campaign_id == campaign_id)
            .map(|entry| entry.value().clone())
            .collect();
        vouchers.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(vouchers)
    }
}
