//! 业务服务层
//!
//! - `campaign_service`: 活动创建、券码批量生成
//! - `redemption_service`: 券码核销
//! - `code_generator`: 候选券码生成

mod campaign_service;
pub mod code_generator;
mod redemption_service;

pub use campaign_service::CampaignService;
pub use code_generator::{CodeGenerator, RandomCodeGenerator};
pub use redemption_service::RedemptionService;
