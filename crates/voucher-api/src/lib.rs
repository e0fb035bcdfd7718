//! 活动券码 HTTP 服务
//!
//! 将活动创建、券码生成与核销暴露为 REST API。
//!
//! ## 模块结构
//!
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型与 HTTP 状态码映射
//! - `handlers`: HTTP 请求处理器
//! - `middleware`: 错误文案本地化
//! - `reason`: 响应文案键
//! - `routes`: 路由配置
//! - `state`: 应用状态

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod reason;
pub mod routes;
pub mod state;

pub use dto::ApiResponse;
pub use error::{ApiError, Result};
pub use state::AppState;
