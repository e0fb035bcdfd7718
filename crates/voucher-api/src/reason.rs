//! 响应文案键
//!
//! 与 `locales/{language}.yaml` 中的点分键一一对应

pub const INVALID_REQUEST_FORMAT: &str = "error.invalid_request_format";
pub const INVALID_REQUEST: &str = "error.invalid_request";
pub const INTERNAL_SERVER_ERROR: &str = "error.internal_server_error";
pub const INVALID_DATE_RANGE: &str = "error.invalid_date_range";
pub const INVALID_START_DATE: &str = "error.invalid_start_date";
pub const INVALID_END_DATE: &str = "error.invalid_end_date";
pub const CAMPAIGN_NOT_FOUND: &str = "error.campaign_not_found";
pub const VOUCHER_NOT_FOUND: &str = "error.voucher_not_found";
pub const CAPACITY_EXCEEDED: &str = "error.capacity_exceeded";
pub const VOUCHER_ALREADY_USED: &str = "error.voucher_already_used";
pub const VOUCHER_EXPIRED: &str = "error.voucher_expired";
pub const UNSUPPORTED_LANGUAGE: &str = "error.unsupported_language";

pub const SUCCESS: &str = "success.ok";
