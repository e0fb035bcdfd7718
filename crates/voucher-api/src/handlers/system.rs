//! 系统设置 API 处理器

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{info, warn};
use validator::Validate;

use crate::{
    dto::{ApiResponse, LanguageDto, SetLanguageRequest},
    error::ApiError,
    reason,
    state::AppState,
};

/// 查询当前语言
///
/// GET /api/v1/system/language
pub async fn get_language(State(state): State<AppState>) -> Json<ApiResponse<LanguageDto>> {
    Json(ApiResponse::success_with_message(
        LanguageDto {
            language: state.localizer.language(),
        },
        state.message(reason::SUCCESS),
    ))
}

/// 切换响应文案语言
///
/// PUT /api/v1/system/language
///
/// 语言文件不存在或无法解析时保留当前语言
pub async fn set_language(
    State(state): State<AppState>,
    payload: Result<Json<SetLanguageRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LanguageDto>>, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    if let Err(e) = state.localizer.set_language(&req.language) {
        warn!(language = %req.language, error = %e, "Failed to switch language");
        return Err(ApiError::UnsupportedLanguage(req.language));
    }

    info!(language = %req.language, "Response language switched");

    Ok(Json(ApiResponse::success_with_message(
        LanguageDto {
            language: state.localizer.language(),
        },
        state.message(reason::SUCCESS),
    )))
}
