//! 活动服务
//!
//! 处理活动创建和券码批量生成，包括：
//! - 活动时间范围校验
//! - 名额原子占用（先占用，后写券码）
//! - 单张券码写入失败时跳过并继续
//! - 批次结束后归还被跳过券码占用的名额
//!
//! ## 生成流程
//!
//! 1. 读取活动 -> 2. 剩余名额预检 -> 3. 原子占用 count 个名额
//!    -> 4. 逐张生成并写入 -> 5. 归还跳过的名额
//!
//! 最终 used_users 的增量等于实际写入的券码数量。

use std::sync::Arc;

use chrono::Utc;
use tracing::{Instrument, error, info, instrument, warn};
use uuid::Uuid;

use voucher_shared::observability::metrics;

use super::code_generator::{CodeGenerator, RandomCodeGenerator};
use crate::error::{EngineError, Result};
use crate::models::{Campaign, CampaignDraft, Voucher};
use crate::repository::{CampaignRepositoryTrait, VoucherRepositoryTrait};

/// 活动服务
pub struct CampaignService {
    campaign_repo: Arc<dyn CampaignRepositoryTrait>,
    voucher_repo: Arc<dyn VoucherRepositoryTrait>,
    code_generator: Arc<dyn CodeGenerator>,
}

impl CampaignService {
    pub fn new(
        campaign_repo: Arc<dyn CampaignRepositoryTrait>,
        voucher_repo: Arc<dyn VoucherRepositoryTrait>,
    ) -> Self {
        Self {
            campaign_repo,
            voucher_repo,
            code_generator: Arc::new(RandomCodeGenerator),
        }
    }

    /// 替换券码生成器
    pub fn with_code_generator(mut self, code_generator: Arc<dyn CodeGenerator>) -> Self {
        self.code_generator = code_generator;
        self
    }

    /// 创建活动
    ///
    /// 开始时间必须严格早于结束时间，新活动 used_users 为 0
    #[instrument(skip(self, draft), fields(name = %draft.name, max_users = draft.max_users))]
    pub async fn create_campaign(&self, draft: CampaignDraft) -> Result<Campaign> {
        if !draft.has_valid_range() {
            return Err(EngineError::InvalidRange {
                start: draft.start_date,
                end: draft.end_date,
            });
        }

        let campaign = draft.into_campaign(Utc::now());
        let id = self.campaign_repo.insert_campaign(&campaign).await?;

        info!(campaign_id = %id, "活动创建成功");

        Ok(Campaign { id, ..campaign })
    }

    /// 查询活动
    #[instrument(skip(self))]
    pub async fn get_campaign(&self, campaign_id: Uuid) -> Result<Campaign> {
        self.campaign_repo
            .get_campaign_by_id(campaign_id)
            .await?
            .ok_or(EngineError::CampaignNotFound(campaign_id))
    }

    /// 查询活动下的券码
    #[instrument(skip(self))]
    pub async fn list_vouchers(&self, campaign_id: Uuid) -> Result<Vec<Voucher>> {
        self.get_campaign(campaign_id).await?;
        self.voucher_repo.list_vouchers_by_campaign(campaign_id).await
    }

    /// 批量生成券码
    ///
    /// 名额不足时直接拒绝，不产生任何写入。单张券码写入失败（含券码冲突）
    /// 只记录告警并跳过，返回实际写入成功的券码
    ///
    /// 占用、写入、归还在独立任务中执行：调用方的 future 被丢弃（请求超时、
    /// 客户端断开）时批次仍会执行完毕并归还名额
    #[instrument(skip(self), fields(campaign_id = %campaign_id, count = count))]
    pub async fn generate_vouchers(&self, campaign_id: Uuid, count: u32) -> Result<Vec<Voucher>> {
        if count == 0 {
            return Err(EngineError::Validation(
                "count must be greater than 0".to_string(),
            ));
        }

        let campaign = self.get_campaign(campaign_id).await?;
        let requested = i64::from(count);

        let remaining = campaign.remaining_capacity();
        if requested > remaining {
            metrics::record_voucher_generation("capacity_exceeded", 0, 0);
            return Err(EngineError::CapacityExceeded {
                requested,
                available: remaining,
            });
        }

        let batch = VoucherBatch {
            campaign_repo: self.campaign_repo.clone(),
            voucher_repo: self.voucher_repo.clone(),
            code_generator: self.code_generator.clone(),
            campaign,
            requested,
        };

        tokio::spawn(batch.run().in_current_span())
            .await
            .map_err(|e| EngineError::Internal(format!("voucher batch task failed: {}", e)))?
    }
}

/// 一次券码生成批次，在独立任务中运行
struct VoucherBatch {
    campaign_repo: Arc<dyn CampaignRepositoryTrait>,
    voucher_repo: Arc<dyn VoucherRepositoryTrait>,
    code_generator: Arc<dyn CodeGenerator>,
    campaign: Campaign,
    requested: i64,
}

impl VoucherBatch {
    async fn run(self) -> Result<Vec<Voucher>> {
        let campaign_id = self.campaign.id;
        let requested = self.requested;

        if !self
            .campaign_repo
            .reserve_capacity(campaign_id, requested)
            .await?
        {
            // 预检后被并发请求抢占，重新读取以返回准确的剩余名额
            let available = self
                .campaign_repo
                .get_campaign_by_id(campaign_id)
                .await?
                .map(|c| c.remaining_capacity())
                .unwrap_or(0);
            warn!(requested, available, "名额占用失败");
            metrics::record_voucher_generation("capacity_exceeded", 0, 0);
            return Err(EngineError::CapacityExceeded {
                requested,
                available,
            });
        }

        let now = Utc::now();
        let mut created = Vec::with_capacity(requested as usize);
        for _ in 0..requested {
            let voucher = Voucher::issue(self.code_generator.generate(), &self.campaign, now);
            match self.voucher_repo.insert_voucher(&voucher).await {
                Ok(()) => created.push(voucher),
                Err(e) => {
                    warn!(code = %voucher.code, error = %e, "券码写入失败，跳过");
                }
            }
        }

        let persisted = created.len() as u64;
        let skipped = requested - created.len() as i64;
        if skipped > 0 {
            if let Err(e) = self
                .campaign_repo
                .release_capacity(campaign_id, skipped)
                .await
            {
                error!(skipped, error = %e, "归还名额失败，已写入的券码保留");
                metrics::record_voucher_generation("release_failed", persisted, skipped as u64);
                return Err(EngineError::Persistence(format!(
                    "failed to release {} reserved slots for campaign {}: {}",
                    skipped, campaign_id, e
                )));
            }
        }

        let status = if skipped == 0 { "success" } else { "partial" };
        metrics::record_voucher_generation(status, persisted, skipped as u64);

        info!(created = persisted, skipped, "券码生成完成");

        Ok(created)
    }
}
