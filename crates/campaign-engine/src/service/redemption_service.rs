//! 券码核销服务
//!
//! 核销流程只有一次读取和一次条件写入：
//! 1. 按券码读取 -> 2. 已使用 / 过期检查 -> 3. `mark_redeemed` 条件写入
//!
//! 第 3 步只在券码仍未使用时成功，并发请求中只有一个能完成核销，其余返回 AlreadyUsed。

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use voucher_shared::observability::metrics;

use crate::error::{EngineError, Result};
use crate::models::Voucher;
use crate::repository::VoucherRepositoryTrait;

/// 券码核销服务
pub struct RedemptionService {
    voucher_repo: Arc<dyn VoucherRepositoryTrait>,
}

impl RedemptionService {
    pub fn new(voucher_repo: Arc<dyn VoucherRepositoryTrait>) -> Self {
        Self { voucher_repo }
    }

    /// 核销券码
    pub async fn redeem_voucher(&self, code: &str, user_id: &str) -> Result<Voucher> {
        self.redeem_voucher_at(code, user_id, Utc::now()).await
    }

    /// 以指定时间作为当前时间核销券码
    ///
    /// 过期判断使用严格小于：过期时间恰好等于 `now` 时仍可核销
    #[instrument(skip(self), fields(code = %code, user_id = %user_id))]
    pub async fn redeem_voucher_at(
        &self,
        code: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Voucher> {
        let start = Instant::now();
        let result = self.try_redeem(code, user_id, now).await;

        let status = match &result {
            Ok(_) => "success".to_string(),
            Err(e) => e.error_code().to_ascii_lowercase(),
        };
        metrics::record_redemption(&status, start.elapsed().as_secs_f64());

        result
    }

    async fn try_redeem(&self, code: &str, user_id: &str, now: DateTime<Utc>) -> Result<Voucher> {
        let mut voucher = self
            .voucher_repo
            .get_voucher_by_code(code)
            .await?
            .ok_or_else(|| EngineError::VoucherNotFound(code.to_string()))?;

        if voucher.used {
            return Err(EngineError::AlreadyUsed(code.to_string()));
        }

        if voucher.is_expired(now) {
            return Err(EngineError::Expired(code.to_string()));
        }

        if !self
            .voucher_repo
            .mark_redeemed(voucher.id, user_id, now)
            .await?
        {
            warn!("券码已被并发请求核销");
            return Err(EngineError::AlreadyUsed(code.to_string()));
        }

        voucher.redeem(user_id, now);

        info!(voucher_id = %voucher.id, campaign_id = %voucher.campaign_id, "券码核销成功");

        Ok(voucher)
    }
}
