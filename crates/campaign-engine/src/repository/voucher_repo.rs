//! 券码仓储
//!
//! 基于 PostgreSQL 的券码数据访问，券码唯一性由 `vouchers_code_key` 唯一约束保证

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::VoucherRepositoryTrait;
use crate::error::{EngineError, Result};
use crate::models::Voucher;

/// PostgreSQL 唯一约束冲突错误码
const UNIQUE_VIOLATION: &str = "23505";

/// 券码仓储
pub struct VoucherRepository {
    pool: PgPool,
}

impl VoucherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 插入券码
    pub async fn insert_voucher(&self, voucher: &Voucher) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vouchers (id, code, campaign_id, used, user_id,
                                  expiry_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(voucher.id)
        .bind(&voucher.code)
        .bind(voucher.campaign_id)
        .bind(voucher.used)
        .bind(&voucher.user_id)
        .bind(voucher.expiry_date)
        .bind(voucher.created_at)
        .bind(voucher.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &voucher.code))?;

        Ok(())
    }

    /// 按券码查询
    pub async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>> {
        let voucher = sqlx::query_as::<_, Voucher>(
            r#"
            SELECT id, code, campaign_id, used, user_id,
                   expiry_date, created_at, updated_at
            FROM vouchers
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(voucher)
    }

    /// 覆盖写入核销状态
    pub async fn update_voucher(&self, voucher: &Voucher) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE vouchers
            SET used = $2, user_id = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(voucher.id)
        .bind(voucher.used)
        .bind(&voucher.user_id)
        .bind(voucher.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(EngineError::VoucherNotFound(voucher.code.clone()));
        }
        Ok(())
    }

    /// 条件核销，只有 used = false 的行会被更新
    pub async fn mark_redeemed(
        &self,
        id: Uuid,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE vouchers
            SET used = TRUE, user_id = $2, updated_at = $3
            WHERE id = $1 AND used = FALSE
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// 列出活动下的所有券码
    pub async fn list_vouchers_by_campaign(&self, campaign_id: Uuid) -> Result<Vec<Voucher>> {
        let vouchers = sqlx::query_as::<_, Voucher>(
            r#"
            SELECT id, code, campaign_id, used, user_id,
                   expiry_date, created_at, updated_at
            FROM vouchers
            WHERE campaign_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vouchers)
    }
}

/// 唯一约束冲突转换为 DuplicateCode，其余保持数据库错误
fn map_insert_error(err: sqlx::Error, code: &str) -> EngineError {
    let is_unique_violation = err
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|c| c == UNIQUE_VIOLATION);

    if is_unique_violation {
        EngineError::DuplicateCode(code.to_string())
    } else {
        EngineError::Database(err)
    }
}

#[async_trait]
impl VoucherRepositoryTrait for VoucherRepository {
    async fn insert_voucher(&self, voucher: &Voucher) -> Result<()> {
        self.insert_voucher(voucher).await
    }

    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>> {
        self.get_voucher_by_code(code).await
    }

    async fn update_voucher(&self, voucher: &Voucher) -> Result<()> {
        self.update_voucher(voucher).await
    }

    async fn mark_redeemed(&self, id: Uuid, user_id: &str, at: DateTime<Utc>) -> Result<bool> {
        self.mark_redeemed(id, user_id, at).await
    }

    async fn list_vouchers_by_campaign(&self, campaign_id: Uuid) -> Result<Vec<Voucher>> {
        self.list_vouchers_by_campaign(campaign_id).await
    }
}
