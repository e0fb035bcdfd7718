//! 基础设施错误处理模块
//!
//! 定义共享库内部（数据库、配置、多语言文案）使用的错误类型，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 基础设施错误类型
#[derive(Debug, Error)]
pub enum InfraError {
    // ==================== 数据库错误 ====================
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("数据库迁移失败: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    // ==================== 配置错误 ====================
    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    // ==================== 多语言文案错误 ====================
    #[error("文案文件读取失败: {path} - {source}")]
    CatalogRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("文案文件解析失败: {path} - {source}")]
    CatalogParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("文案文件格式无效: {0}")]
    CatalogFormat(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, InfraError>;

impl InfraError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Migration(_) => "MIGRATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::CatalogRead { .. } => "CATALOG_READ_ERROR",
            Self::CatalogParse { .. } => "CATALOG_PARSE_ERROR",
            Self::CatalogFormat(_) => "CATALOG_FORMAT_ERROR",
        }
    }

    /// 是否为可重试错误
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}
