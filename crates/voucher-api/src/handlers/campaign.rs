//! 活动 API 处理器
//!
//! 活动创建、查询以及批量生成券码

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use campaign_engine::Voucher;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{ApiResponse, CampaignDto, CreateCampaignRequest, GenerateVouchersRequest},
    error::ApiError,
    reason,
    state::AppState,
};

/// 创建活动
///
/// POST /api/v1/campaigns
pub async fn create_campaign(
    State(state): State<AppState>,
    payload: Result<Json<CreateCampaignRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CampaignDto>>), ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let campaign = state.campaign_service.create_campaign(req.into_draft()?).await?;

    info!(campaign_id = %campaign.id, "Campaign created via API");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            CampaignDto::from(campaign),
            state.message(reason::SUCCESS),
        )),
    ))
}

/// 查询活动
///
/// GET /api/v1/campaigns/{id}
pub async fn get_campaign(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<CampaignDto>>, ApiError> {
    let Path(id) = id?;
    let campaign = state.campaign_service.get_campaign(id).await?;

    Ok(Json(ApiResponse::success_with_message(
        CampaignDto::from(campaign),
        state.message(reason::SUCCESS),
    )))
}

/// 批量生成券码
///
/// POST /api/v1/campaigns/{id}/vouchers
pub async fn generate_vouchers(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<GenerateVouchersRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<Voucher>>>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    req.validate()?;

    let vouchers = state
        .campaign_service
        .generate_vouchers(id, req.batch_size())
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        vouchers,
        state.message(reason::SUCCESS),
    )))
}

/// 查询活动下的券码
///
/// GET /api/v1/campaigns/{id}/vouchers
pub async fn list_vouchers(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<Vec<Voucher>>>, ApiError> {
    let Path(id) = id?;
    let vouchers = state.campaign_service.list_vouchers(id).await?;

    Ok(Json(ApiResponse::success_with_message(
        vouchers,
        state.message(reason::SUCCESS),
    )))
}
