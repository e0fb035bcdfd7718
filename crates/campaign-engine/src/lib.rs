//! 活动券码一致性引擎
//!
//! 负责活动名额、券码使用状态在并发生成与核销请求下保持一致。
//!
//! ## 核心功能
//!
//! - **活动创建**：校验有效期并持久化，初始已占用名额为 0
//! - **券码生成**：按剩余名额原子占用后批量写入，单张失败跳过并归还名额
//! - **券码核销**：未使用且未过期的券码经条件写入标记为已使用
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `repository`: 仓储层（PostgreSQL / 内存）
//! - `service`: 业务服务层

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{EngineError, ErrorKind, Result};
pub use models::*;
pub use repository::{
    CampaignRepository, CampaignRepositoryTrait, MemoryCampaignRepository,
    MemoryVoucherRepository, VoucherRepository, VoucherRepositoryTrait,
};
pub use service::{CampaignService, CodeGenerator, RandomCodeGenerator, RedemptionService};
