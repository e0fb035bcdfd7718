//! 活动引擎领域模型

pub mod campaign;
pub mod voucher;

pub use campaign::{Campaign, CampaignDraft};
pub use voucher::Voucher;
