//! HTTP 请求处理器

pub mod campaign;
pub mod health;
pub mod system;
pub mod voucher;
