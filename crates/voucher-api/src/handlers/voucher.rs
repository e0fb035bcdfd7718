//! 券码核销 API 处理器

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use campaign_engine::Voucher;
use validator::Validate;

use crate::{
    dto::{ApiResponse, RedeemVoucherRequest},
    error::ApiError,
    reason,
    state::AppState,
};

/// 核销券码
///
/// POST /api/v1/vouchers/redeem
pub async fn redeem_voucher(
    State(state): State<AppState>,
    payload: Result<Json<RedeemVoucherRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Voucher>>, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let voucher = state
        .redemption_service
        .redeem_voucher(&req.code, &req.user_id)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        voucher,
        state.message(reason::SUCCESS),
    )))
}
