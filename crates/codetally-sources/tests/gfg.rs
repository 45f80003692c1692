//! Integration tests for `GfgAdapter` using wiremock HTTP mocks.

use std::time::Duration;

use codetally_core::{DifficultyCounts, SourceExtra, SourceResult};
use codetally_sources::{GfgAdapter, RetryPolicy, SourceAdapter, SourceError, SourceHttp};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_adapter(api: &MockServer, site: &MockServer, max_attempts: u32) -> GfgAdapter {
    let http = SourceHttp::new(
        Duration::from_secs(5),
        "codetally-test",
        RetryPolicy::without_delay(max_attempts),
    )
    .expect("http construction should not fail");
    GfgAdapter::with_base_urls(http, &api.uri(), &site.uri())
        .expect("adapter construction should not fail")
}

const PROFILE_PAGE: &str = r#"
<html><body>
  <div class="profile_name">ada</div>
  <div class="scoreCard_head_left--score">
    <span class="score_card_value">200</span>
  </div>
  <div class="problemsSolved">Problems Solved: <b>180</b></div>
</body></html>
"#;

#[tokio::test]
async fn structured_endpoint_is_preferred() {
    let api = MockServer::start().await;
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/vr/user-stats"))
        .and(query_param("userName", "ada"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": {
                "user_name": "Ada L",
                "profile_image_url": "https://media.geeksforgeeks.org/ada.png",
                "school": 2, "basic": 3, "easy": 10, "medium": 7, "hard": 1,
                "total_problems_solved": 23,
                "score": 88,
                "institution": "Analytical Engine Institute"
            }
        })))
        .expect(1)
        .mount(&api)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PROFILE_PAGE))
        .expect(0)
        .mount(&site)
        .await;

    let adapter = test_adapter(&api, &site, 3);
    let result = adapter.fetch("ada").await;

    let SourceResult::Success(stats) = result else {
        panic!("expected success, got {result:?}");
    };
    assert_eq!(stats.counts, DifficultyCounts::new(2, 20, 1, 23));
    assert_eq!(stats.display_name, "Ada L");
    assert!(!stats.approximate);
    assert_eq!(
        stats.extra,
        Some(SourceExtra::Gfg {
            score: 88,
            institution: "Analytical Engine Institute".to_owned()
        })
    );
}

#[tokio::test]
async fn empty_results_fall_back_to_profile_page() {
    let api = MockServer::start().await;
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/vr/user-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": {}
        })))
        .mount(&api)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/ada/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PROFILE_PAGE))
        .expect(1)
        .mount(&site)
        .await;

    let adapter = test_adapter(&api, &site, 3);
    let stats = adapter.fetch_stats("ada").await.expect("fallback succeeds");

    assert!(stats.approximate);
    assert_eq!(stats.display_name, "ada");
    assert_eq!(stats.counts, DifficultyCounts::new(90, 80, 30, 200));
    assert_eq!(stats.extra, None);
}

#[tokio::test]
async fn api_failure_falls_back_after_retries() {
    let api = MockServer::start().await;
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/vr/user-stats"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&api)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/ada/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PROFILE_PAGE))
        .mount(&site)
        .await;

    let adapter = test_adapter(&api, &site, 3);
    let result = adapter.fetch("ada").await;
    let SourceResult::Success(stats) = result else {
        panic!("expected fallback success, got {result:?}");
    };
    assert!(stats.approximate);
    assert_eq!(stats.counts.total, 200);
}

#[tokio::test]
async fn both_strategies_failing_yields_failure() {
    let api = MockServer::start().await;
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/vr/user-stats"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&api)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/ghost/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&site)
        .await;

    let adapter = test_adapter(&api, &site, 2);
    let err = adapter.fetch_stats("ghost").await.unwrap_err();
    assert!(matches!(err, SourceError::AllStrategiesFailed { .. }));

    let result = adapter.fetch("ghost").await;
    let SourceResult::Failure(failure) = result else {
        panic!("expected failure");
    };
    assert!(failure.reason.contains("profile page failed"));
}
