//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{get, post},
};
use voucher_shared::observability::middleware as obs_middleware;

use crate::{handlers, middleware::localize_errors, state::AppState};

/// 构建活动相关的路由
fn campaign_routes() -> Router<AppState> {
    Router::new()
        .route("/campaigns", post(handlers::campaign::create_campaign))
        .route("/campaigns/{id}", get(handlers::campaign::get_campaign))
        .route(
            "/campaigns/{id}/vouchers",
            post(handlers::campaign::generate_vouchers).get(handlers::campaign::list_vouchers),
        )
}

/// 构建券码相关的路由
fn voucher_routes() -> Router<AppState> {
    Router::new().route("/vouchers/redeem", post(handlers::voucher::redeem_voucher))
}

/// 构建系统设置路由
fn system_routes() -> Router<AppState> {
    Router::new().route(
        "/system/language",
        get(handlers::system::get_language).put(handlers::system::set_language),
    )
}

/// 构建业务 API 路由，挂载在 /api/v1 下
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(campaign_routes())
        .merge(voucher_routes())
        .merge(system_routes())
}

/// 构建完整应用：业务路由、探针和中间件
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // 错误文案本地化
        .layer(middleware::from_fn_with_state(state.clone(), localize_errors))
        // 可观测性中间件：请求追踪和指标收集
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
