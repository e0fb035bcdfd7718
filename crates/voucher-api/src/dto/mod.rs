//! 请求和响应的数据传输对象

pub mod request;
pub mod response;

pub use request::{
    CreateCampaignRequest, GenerateVouchersRequest, MAX_BATCH_SIZE, RedeemVoucherRequest,
    SetLanguageRequest,
};
pub use response::{ApiResponse, CampaignDto, LanguageDto};
