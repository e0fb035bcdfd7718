//! 共享库
//!
//! 包含所有服务共用的配置、数据库连接、可观测性、多语言文案等基础设施代码。

pub mod config;
pub mod database;
pub mod error;
pub mod i18n;
pub mod observability;
pub mod test_utils;
