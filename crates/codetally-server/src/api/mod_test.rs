use std::sync::atomic::{AtomicU32, Ordering};

use axum::body::{to_bytes, Body};
use axum::http::Request;
use codetally_core::{DifficultyCounts, SourceResult, SourceStats};
use codetally_sources::{SourceAdapter, SourceRegistry};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;

/// Answers every handle with fixed counts, except `missing`, which fails.
struct StubAdapter {
    source: Source,
    calls: Arc<AtomicU32>,
}

impl SourceAdapter for StubAdapter {
    fn source(&self) -> Source {
        self.source
    }

    fn fetch<'a>(&'a self, handle: &'a str) -> BoxFuture<'a, SourceResult> {
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if handle == "missing" {
                return SourceResult::failure(self.source, handle, "user missing not found");
            }
            SourceResult::Success(SourceStats {
                source: self.source,
                handle: handle.to_owned(),
                display_name: handle.to_owned(),
                avatar: String::new(),
                counts: DifficultyCounts::new(40, 50, 10, 100),
                extra: None,
                approximate: false,
            })
        }
        .boxed()
    }
}

fn test_state(pool: Option<PgPool>) -> (AppState, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let mut registry = SourceRegistry::new();
    for source in Source::ALL {
        registry.register(Arc::new(StubAdapter {
            source,
            calls: Arc::clone(&calls),
        }));
    }
    let state = AppState {
        analyzer: Arc::new(Analyzer::new(registry, 4)),
        pool,
    };
    (state, calls)
}

fn app(pool: Option<PgPool>) -> (Router, Arc<AtomicU32>) {
    let (state, calls) = test_state(pool);
    (build_app(state, &[]), calls)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn analyse_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/analyse")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

#[test]
fn normalize_limit_applies_defaults_and_bounds() {
    assert_eq!(normalize_limit(None), 10);
    assert_eq!(normalize_limit(Some(0)), 1);
    assert_eq!(normalize_limit(Some(1_000)), 100);
    assert_eq!(normalize_limit(Some(25)), 25);
}

#[test]
fn api_error_codes_map_to_statuses() {
    let status = |code: &str| ApiError::new("req-1", code, "m").into_response().status();
    assert_eq!(status("validation_error"), StatusCode::BAD_REQUEST);
    assert_eq!(status("unavailable"), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(status("not_found"), StatusCode::NOT_FOUND);
    assert_eq!(status("internal_error"), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_disabled_database() {
    let (app, _) = app(None);
    let (status, json) = send(app, get_request("/api/v1/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["database"], "disabled");
    assert_eq!(json["data"]["platforms"], json!(["leetcode", "codeforces", "gfg"]));
}

#[tokio::test]
async fn platforms_lists_every_source() {
    let (app, _) = app(None);
    let (status, json) = send(app, get_request("/api/v1/platforms")).await;

    assert_eq!(status, StatusCode::OK);
    let items = json["data"].as_array().expect("data array");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["id"], "leetcode");
    assert_eq!(items[0]["name"], "LeetCode");
    assert_eq!(items[2]["urlFormat"], "https://www.geeksforgeeks.org/user/{username}");
}

#[tokio::test]
async fn request_id_header_is_echoed() {
    let (app, _) = app(None);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/platforms")
                .header(REQUEST_ID_HEADER, "req-abc")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()),
        Some("req-abc")
    );
}

#[tokio::test]
async fn analyse_returns_report() {
    let (app, calls) = app(None);
    let body = r#"{"profiles": {"leetcode": "alice", "codeforces": ["bob", "missing"]}}"#;
    let (status, json) = send(app, analyse_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    let data = &json["data"];
    assert_eq!(data["platforms"]["leetcode"]["success"], true);
    assert_eq!(data["platforms"]["codeforces_bob"]["success"], true);
    assert_eq!(data["platforms"]["codeforces_missing"]["success"], false);
    assert_eq!(data["overall"]["stats"]["total"], 200);
    assert_eq!(data["overall"]["uniqueProblems"], 140);
    assert_eq!(data["overall"]["platformsAnalyzed"], 2);
    assert_eq!(data["overall"]["totalAccounts"], 3);
    assert!(data["aiInsights"].is_object());
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn analyse_rejects_unknown_source_before_fetching() {
    let (app, calls) = app(None);
    let body = r#"{"profiles": {"leetcode": "alice", "hackerrank": "bob"}}"#;
    let (status, json) = send(app, analyse_request(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json["error"]["message"]
        .as_str()
        .is_some_and(|m| m.contains("hackerrank")));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn analyse_rejects_empty_profiles() {
    for body in [r#"{"profiles": {}}"#, r#"{"profiles": {"gfg": ["", "  "]}}"#, "{}"] {
        let (app, calls) = app(None);
        let (status, json) = send(app, analyse_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn analyse_rejects_malformed_json() {
    let (app, _) = app(None);
    let (status, json) = send(app, analyse_request("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn history_without_database_is_unavailable() {
    let (app, _) = app(None);
    let (status, json) = send(app, get_request("/api/v1/history")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "unavailable");
}

#[sqlx::test(migrations = "../../migrations")]
async fn analyse_is_persisted_and_listed_in_history(pool: sqlx::PgPool) {
    let (state, _) = test_state(Some(pool));

    let (status, _) = send(
        build_app(state.clone(), &[]),
        analyse_request(r#"{"profiles": {"gfg": "carol"}}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(build_app(state, &[]), get_request("/api/v1/history?limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    let rows = json["data"].as_array().expect("data array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["report"]["platforms"]["gfg"]["username"], "carol");
    assert!(rows[0]["createdAt"].is_string());
}

#[sqlx::test(migrations = "../../migrations")]
async fn health_reports_live_database(pool: sqlx::PgPool) {
    let (app, _) = app(Some(pool));
    let (status, json) = send(app, get_request("/api/v1/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["database"], "ok");
}
