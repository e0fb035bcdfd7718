//! 活动券码服务
//!
//! 提供活动创建、券码批量生成和核销的 REST API。

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info, warn};
use voucher_api::{routes, state::AppState};
use voucher_shared::{
    config::{AppConfig, StorageBackend},
    database::Database,
    i18n::Localizer,
    observability,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load("voucher-api")?;

    let _guard = observability::init(&config.service_name, &config.observability).await?;

    info!(
        environment = %config.environment,
        "Starting voucher-api on {}",
        config.server_addr()
    );

    let localizer = match Localizer::load(&config.i18n.path, &config.i18n.language) {
        Ok(localizer) => localizer,
        Err(e) => {
            // 文案缺失不阻止启动，所有消息返回兜底文案
            warn!(
                path = %config.i18n.path,
                language = %config.i18n.language,
                error = %e,
                "Failed to load messages, responses will use fallback text"
            );
            Localizer::empty()
        }
    };
    let localizer = Arc::new(localizer);

    let state = match config.storage.backend {
        StorageBackend::Postgres => {
            let db = Database::connect(&config.database).await?;
            if config.database.run_migrations {
                db.run_migrations().await?;
            }
            AppState::postgres(db, localizer)
        }
        StorageBackend::Memory => {
            if config.is_production() {
                warn!("内存存储不持久化数据，生产环境请使用 postgres");
            }
            info!("Using in-memory storage");
            AppState::in_memory(localizer)
        }
    };
    let database = state.database.clone();

    let app = routes::app(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = database {
        db.close().await;
    }

    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
///
/// 收到 SIGTERM 或 Ctrl+C 后返回，触发 axum 的优雅关闭流程。
/// 信号处理器注册失败时该分支永不完成。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "注册 Ctrl+C 处理器失败");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "注册 SIGTERM 处理器失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
