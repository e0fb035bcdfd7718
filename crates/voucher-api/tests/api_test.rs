//! HTTP 接口集成测试
//!
//! 使用内存存储和临时文案目录，通过 `oneshot` 直接驱动路由

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use voucher_api::{routes, state::AppState};
use voucher_shared::i18n::Localizer;
use voucher_shared::observability::middleware::REQUEST_ID_HEADER;

const EN: &str = r#"
error:
  invalid_request_format: "Invalid request format."
  invalid_request: "Invalid request."
  internal_server_error: "Internal server error."
  invalid_date_range: "Start date must be before end date."
  invalid_start_date: "Invalid start date format."
  invalid_end_date: "Invalid end date format."
  campaign_not_found: "Campaign not found."
  voucher_not_found: "Voucher not found."
  capacity_exceeded: "Not enough vouchers remaining for this campaign."
  voucher_already_used: "Voucher has already been used."
  voucher_expired: "Voucher has expired."
  unsupported_language: "Language is not supported."
success:
  ok: "OK"
"#;

const ZH: &str = r#"
error:
  voucher_not_found: "优惠券不存在"
  unsupported_language: "不支持的语言"
success:
  ok: "操作成功"
"#;

struct TestApp {
    router: Router,
    // 文案目录需要在测试期间保持存在
    _locales: TempDir,
}

impl TestApp {
    fn new() -> Self {
        let locales = TempDir::new().unwrap();
        std::fs::write(locales.path().join("en.yaml"), EN).unwrap();
        std::fs::write(locales.path().join("zh.yaml"), ZH).unwrap();

        let localizer = Arc::new(Localizer::load(locales.path(), "en").unwrap());
        let router = routes::app(AppState::in_memory(localizer));

        Self {
            router,
            _locales: locales,
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(raw) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(raw.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(&body.to_string())).await
    }

    /// 创建活动并返回 id
    async fn create_campaign(&self, max_users: i64, start: &str, end: &str) -> String {
        let (status, body) = self
            .post_json(
                "/api/v1/campaigns",
                json!({
                    "name": "Autumn Sale",
                    "discount": 25.0,
                    "maxUsers": max_users,
                    "startDate": start,
                    "endDate": end,
                    "description": "seasonal"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn open_campaign(&self, max_users: i64) -> String {
        self.create_campaign(max_users, "2020-01-01T00:00:00Z", "2999-01-01T00:00:00Z")
            .await
    }
}

#[tokio::test]
async fn test_health_and_ready() {
    let app = TestApp::new();

    let (status, body) = app.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "voucher-api");

    let (status, body) = app.send("GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["checks"]["storage"], "memory");
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let app = TestApp::new();
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
}

#[tokio::test]
async fn test_create_and_get_campaign() {
    let app = TestApp::new();
    let id = app.open_campaign(10).await;

    let (status, body) = app.send("GET", &format!("/api/v1/campaigns/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "OK");
    assert_eq!(body["data"]["name"], "Autumn Sale");
    assert_eq!(body["data"]["maxUsers"], 10);
    assert_eq!(body["data"]["usedUsers"], 0);
    assert_eq!(body["data"]["remainingCapacity"], 10);
    assert_eq!(body["data"]["description"], "seasonal");
}

#[tokio::test]
async fn test_create_campaign_rejects_inverted_range() {
    let app = TestApp::new();
    let (status, body) = app
        .post_json(
            "/api/v1/campaigns",
            json!({
                "name": "Backwards",
                "discount": 5.0,
                "maxUsers": 3,
                "startDate": "2026-05-01T00:00:00Z",
                "endDate": "2026-05-01T00:00:00Z"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_DATE_RANGE");
    assert_eq!(body["message"], "Start date must be before end date.");
}

#[tokio::test]
async fn test_create_campaign_rejects_bad_dates() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/v1/campaigns",
            json!({
                "name": "Bad",
                "discount": 5.0,
                "maxUsers": 3,
                "startDate": "not-a-date",
                "endDate": "2026-05-01T00:00:00Z"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_START_DATE");
    assert_eq!(body["message"], "Invalid start date format.");

    let (status, body) = app
        .post_json(
            "/api/v1/campaigns",
            json!({
                "name": "Bad",
                "discount": 5.0,
                "maxUsers": 3,
                "startDate": "2026-05-01T00:00:00Z",
                "endDate": "05/02/2026"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_END_DATE");
}

#[tokio::test]
async fn test_malformed_json_is_localized() {
    let app = TestApp::new();
    let (status, body) = app
        .send("POST", "/api/v1/campaigns", Some("{\"name\": "))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST_FORMAT");
    assert_eq!(body["message"], "Invalid request format.");
}

#[tokio::test]
async fn test_generate_rejects_non_positive_count() {
    let app = TestApp::new();
    let id = app.open_campaign(5).await;

    for count in [0, -2] {
        let (status, body) = app
            .post_json(
                &format!("/api/v1/campaigns/{}/vouchers", id),
                json!({ "count": count }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
        assert_eq!(body["message"], "Invalid request.");
    }
}

#[tokio::test]
async fn test_generate_list_and_capacity() {
    let app = TestApp::new();
    let id = app.open_campaign(10).await;
    let vouchers_uri = format!("/api/v1/campaigns/{}/vouchers", id);

    let (status, body) = app.post_json(&vouchers_uri, json!({ "count": 3 })).await;
    assert_eq!(status, StatusCode::OK);
    let generated = body["data"].as_array().unwrap();
    assert_eq!(generated.len(), 3);
    for voucher in generated {
        assert_eq!(voucher["campaignId"], id.as_str());
        assert_eq!(voucher["used"], false);
        assert_eq!(voucher["code"].as_str().unwrap().len(), 10);
    }

    let (status, body) = app.send("GET", &vouchers_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (status, body) = app.post_json(&vouchers_uri, json!({ "count": 8 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CAPACITY_EXCEEDED");

    let (_, body) = app.send("GET", &format!("/api/v1/campaigns/{}", id), None).await;
    assert_eq!(body["data"]["usedUsers"], 3);
    assert_eq!(body["data"]["remainingCapacity"], 7);
}

#[tokio::test]
async fn test_unknown_campaign_and_bad_id() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "GET",
            "/api/v1/campaigns/0190a6c4-3a2e-7c3f-9f5e-2b1d9a7e4c10",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CAMPAIGN_NOT_FOUND");
    assert_eq!(body["message"], "Campaign not found.");

    let (status, body) = app.send("GET", "/api/v1/campaigns/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_redeem_flow() {
    let app = TestApp::new();
    let id = app.open_campaign(2).await;

    let (_, body) = app
        .post_json(
            &format!("/api/v1/campaigns/{}/vouchers", id),
            json!({ "count": 1 }),
        )
        .await;
    let code = body["data"][0]["code"].as_str().unwrap().to_string();

    let (status, body) = app
        .post_json(
            "/api/v1/vouchers/redeem",
            json!({ "code": code, "userId": "user123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["used"], true);
    assert_eq!(body["data"]["userId"], "user123");

    let (status, body) = app
        .post_json(
            "/api/v1/vouchers/redeem",
            json!({ "code": code, "userId": "user456" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "VOUCHER_ALREADY_USED");
    assert_eq!(body["message"], "Voucher has already been used.");

    // 核销结果保持首次写入
    let (_, body) = app
        .send("GET", &format!("/api/v1/campaigns/{}/vouchers", id), None)
        .await;
    assert_eq!(body["data"][0]["userId"], "user123");
}

#[tokio::test]
async fn test_redeem_rejections() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/v1/vouchers/redeem",
            json!({ "code": "NOSUCHCODE", "userId": "user123" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "VOUCHER_NOT_FOUND");

    let (status, body) = app
        .post_json(
            "/api/v1/vouchers/redeem",
            json!({ "code": "NOSUCHCODE", "userId": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");

    // 活动已结束：券码生成后即过期
    let id = app
        .create_campaign(1, "2020-01-01T00:00:00Z", "2020-02-01T00:00:00Z")
        .await;
    let (_, body) = app
        .post_json(
            &format!("/api/v1/campaigns/{}/vouchers", id),
            json!({ "count": 1 }),
        )
        .await;
    let code = body["data"][0]["code"].as_str().unwrap().to_string();

    let (status, body) = app
        .post_json(
            "/api/v1/vouchers/redeem",
            json!({ "code": code, "userId": "user123" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "VOUCHER_EXPIRED");
    assert_eq!(body["message"], "Voucher has expired.");
}

#[tokio::test]
async fn test_language_switch() {
    let app = TestApp::new();

    let (status, body) = app
        .send("PUT", "/api/v1/system/language", Some(r#"{"language":"zh"}"#))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["language"], "zh");
    assert_eq!(body["message"], "操作成功");

    let (status, body) = app
        .post_json(
            "/api/v1/vouchers/redeem",
            json!({ "code": "NOSUCHCODE", "userId": "user123" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "优惠券不存在");

    // 缺失的键返回兜底文案
    let (_, body) = app.send("GET", "/api/v1/campaigns/not-a-uuid", None).await;
    assert_eq!(body["message"], "Message not found");

    let (status, body) = app
        .send("PUT", "/api/v1/system/language", Some(r#"{"language":"fr"}"#))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNSUPPORTED_LANGUAGE");
    assert_eq!(body["message"], "不支持的语言");

    let (_, body) = app.send("GET", "/api/v1/system/language", None).await;
    assert_eq!(body["data"]["language"], "zh");
}
