//! 活动仓储
//!
//! 基于 PostgreSQL 的活动数据访问，名额增减全部在单条 UPDATE 中完成

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::CampaignRepositoryTrait;
use crate::error::{EngineError, Result};
use crate::models::Campaign;

/// 活动仓储
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 插入活动
    pub async fn insert_campaign(&self, campaign: &Campaign) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO campaigns (id, name, discount, max_users, used_users,
                                   start_date, end_date, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(campaign.id)
        .bind(&campaign.name)
        .bind(campaign.discount)
        .bind(campaign.max_users)
        .bind(campaign.used_users)
        .bind(campaign.start_date)
        .bind(campaign.end_date)
        .bind(&campaign.description)
        .bind(campaign.created_at)
        .bind(campaign.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// 获取单个活动
    pub async fn get_campaign_by_id(&self, id: Uuid) -> Result<Option<Campaign>> {
        let campaign = sqlx::query_as::<_, Campaign>(
            r#"
            SELECT id, name, discount, max_users, used_users,
                   start_date, end_date, description, created_at, updated_at
            FROM campaigns
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(campaign)
    }

    /// used_users 加 1
    pub async fn increment_used_users(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE campaigns
            SET used_users = used_users + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(EngineError::CampaignNotFound(id));
        }
        Ok(())
    }

    /// 有上限的原子占用
    pub async fn reserve_capacity(&self, id: Uuid, count: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE campaigns
            SET used_users = used_users + $2, updated_at = NOW()
            WHERE id = $1 AND used_users + $2 <= max_users
            "#,
        )
        .bind(id)
        .bind(count)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// 归还名额
    pub async fn release_capacity(&self, id: Uuid, count: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE campaigns
            SET used_users = GREATEST(used_users - $2, 0), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(count)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(EngineError::CampaignNotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl CampaignRepositoryTrait for CampaignRepository {
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<Uuid> {
        self.insert_campaign(campaign).await
    }

    async fn get_campaign_by_id(&self, id: Uuid) -> Result<Option<Campaign>> {
        self.get_campaign_by_id(id).await
    }

    async fn increment_used_users(&self, id: Uuid) -> Result<()> {
        self.increment_used_users(id).await
    }

    async fn reserve_capacity(&self, id: Uuid, count: i64) -> Result<bool> {
        self.reserve_capacity(id, count).await
    }

    async fn release_capacity(&self, id: Uuid, count: i64) -> Result<()> {
        self.release_capacity(id, count).await
    }
}
