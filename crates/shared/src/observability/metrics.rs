//! Prometheus 指标
//!
//! 业务代码通过 `record_*` 函数打点；未安装 recorder 时打点为空操作。
//! 导出端口与业务端口分离，只提供 `/metrics` 和 `/health`。

use std::net::SocketAddr;

use anyhow::Result;
use axum::{Router, routing::get};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::{net::TcpListener, task::JoinHandle};
use tracing::{error, info};

pub const HTTP_REQUESTS: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";
pub const GENERATION_REQUESTS: &str = "voucher_generation_requests_total";
pub const VOUCHERS_GENERATED: &str = "vouchers_generated_total";
pub const VOUCHERS_SKIPPED: &str = "vouchers_skipped_total";
pub const REDEMPTIONS: &str = "voucher_redemptions_total";
pub const REDEMPTION_DURATION: &str = "voucher_redemption_duration_seconds";

/// 指标导出服务的句柄，drop 时导出任务随 runtime 结束
pub struct MetricsHandle {
    _exporter: JoinHandle<()>,
}

/// 安装全局 recorder 并在 `metrics_port` 上启动导出服务
pub async fn init(service_name: &str, metrics_port: u16) -> Result<MetricsHandle> {
    let recorder = PrometheusBuilder::new()
        .add_global_label("service", service_name)
        .install_recorder()?;

    describe_all();

    let addr = SocketAddr::from(([0, 0, 0, 0], metrics_port));
    let exporter = serve_exporter(addr, recorder).await?;

    Ok(MetricsHandle {
        _exporter: exporter,
    })
}

fn describe_all() {
    describe_counter!(HTTP_REQUESTS, "HTTP requests handled");
    describe_histogram!(HTTP_REQUEST_DURATION, "HTTP request latency in seconds");
    describe_counter!(GENERATION_REQUESTS, "Voucher generation requests by outcome");
    describe_counter!(VOUCHERS_GENERATED, "Vouchers persisted by generation requests");
    describe_counter!(VOUCHERS_SKIPPED, "Vouchers skipped during generation");
    describe_counter!(REDEMPTIONS, "Voucher redemption attempts by outcome");
    describe_histogram!(REDEMPTION_DURATION, "Voucher redemption latency in seconds");
}

async fn serve_exporter(addr: SocketAddr, recorder: PrometheusHandle) -> Result<JoinHandle<()>> {
    let router = Router::new()
        .route("/metrics", get(move || std::future::ready(recorder.render())))
        .route("/health", get(|| async { "OK" }));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Metrics exporter listening");

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!(error = %e, "Metrics exporter stopped");
        }
    }))
}

/// HTTP 请求计数与耗时
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!(HTTP_REQUESTS, &labels).increment(1);
    histogram!(HTTP_REQUEST_DURATION, &labels).record(duration_secs);
}

/// 一次券码生成请求
///
/// `created` 为实际落库数量，`skipped` 为因冲突或写入失败被跳过的数量
pub fn record_voucher_generation(status: &str, created: u64, skipped: u64) {
    counter!(GENERATION_REQUESTS, "status" => status.to_string()).increment(1);
    if created > 0 {
        counter!(VOUCHERS_GENERATED).increment(created);
    }
    if skipped > 0 {
        counter!(VOUCHERS_SKIPPED).increment(skipped);
    }
}

/// 一次核销尝试，`status` 为 success 或小写错误码
pub fn record_redemption(status: &str, duration_secs: f64) {
    let labels = [("status", status.to_string())];
    counter!(REDEMPTIONS, &labels).increment(1);
    histogram!(REDEMPTION_DURATION, &labels).record(duration_secs);
}
