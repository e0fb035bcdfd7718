//! HTTP 中间件

use axum::Json;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::dto::ApiResponse;
use crate::error::ErrorReason;
use crate::state::AppState;

/// 错误响应本地化
///
/// 处理器返回的错误响应在 message 字段里只携带文案键，
/// 这里按 [`ErrorReason`] 替换为当前语言的文案，状态码和错误码保持不变。
pub async fn localize_errors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let Some(reason) = response.extensions().get::<ErrorReason>().copied() else {
        return response;
    };

    let status = response.status();
    let message = state.message(reason.key);
    debug!(code = reason.code, key = reason.key, "Localized error response");

    let mut localized = (status, Json(ApiResponse::<()>::error(reason.code, message))).into_response();
    localized.extensions_mut().insert(reason);
    localized
}
