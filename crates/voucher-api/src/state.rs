//! 应用状态定义
//!
//! 包含 Axum 路由共享的服务实例和文案查询

use std::sync::Arc;

use campaign_engine::{
    CampaignRepository, CampaignService, MemoryCampaignRepository, MemoryVoucherRepository,
    RedemptionService, VoucherRepository,
};
use voucher_shared::database::Database;
use voucher_shared::i18n::Localizer;

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub campaign_service: Arc<CampaignService>,
    pub redemption_service: Arc<RedemptionService>,
    pub localizer: Arc<Localizer>,
    /// PostgreSQL 后端时持有连接池，用于就绪检查
    pub database: Option<Database>,
}

impl AppState {
    /// 使用内存存储构造（本地开发和测试）
    pub fn in_memory(localizer: Arc<Localizer>) -> Self {
        let campaign_repo = Arc::new(MemoryCampaignRepository::new());
        let voucher_repo = Arc::new(MemoryVoucherRepository::new());

        Self {
            campaign_service: Arc::new(CampaignService::new(
                campaign_repo,
                voucher_repo.clone(),
            )),
            redemption_service: Arc::new(RedemptionService::new(voucher_repo)),
            localizer,
            database: None,
        }
    }

    /// 使用 PostgreSQL 存储构造
    pub fn postgres(database: Database, localizer: Arc<Localizer>) -> Self {
        let campaign_repo = Arc::new(CampaignRepository::new(database.pool().clone()));
        let voucher_repo = Arc::new(VoucherRepository::new(database.pool().clone()));

        Self {
            campaign_service: Arc::new(CampaignService::new(
                campaign_repo,
                voucher_repo.clone(),
            )),
            redemption_service: Arc::new(RedemptionService::new(voucher_repo)),
            localizer,
            database: Some(database),
        }
    }

    /// 按文案键查询当前语言的文案
    pub fn message(&self, key: &str) -> String {
        self.localizer.translate(key)
    }
}
