//! 仓储层
//!
//! 提供活动和券码的数据访问接口，封装存储细节。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - PostgreSQL 实现使用 SQLx，内存实现使用 DashMap
//! - 并发安全依赖存储层的原子条件更新，服务层不加锁
//! - 定义 trait 接口以支持 mock 测试

mod campaign_repo;
mod memory;
mod traits;
mod voucher_repo;

pub use campaign_repo::CampaignRepository;
pub use memory::{MemoryCampaignRepository, MemoryVoucherRepository};
pub use traits::*;
pub use voucher_repo::VoucherRepository;
