//! 存活 / 就绪探针

use axum::{Json, extract::State};

use crate::state::AppState;

const SERVICE_NAME: &str = "voucher-api";

/// 存活探针：服务进程正常即返回 ok
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// 就绪探针：检查存储是否可用
///
/// 内存存储始终就绪；PostgreSQL 后端执行一次 `SELECT 1`
pub async fn readiness_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let (storage, db_ok) = match &state.database {
        Some(db) => ("postgres", db.health_check().await.is_ok()),
        None => ("memory", true),
    };

    Json(serde_json::json!({
        "status": if db_ok { "ok" } else { "degraded" },
        "service": SERVICE_NAME,
        "checks": {
            "storage": storage,
            "database": if db_ok { "ok" } else { "fail" }
        }
    }))
}
