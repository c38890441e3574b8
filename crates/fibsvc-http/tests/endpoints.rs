//! End-to-end tests for the HTTP surface.
//!
//! These build the real axum `Router` and send requests with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use fibsvc_cache::{LruCache, MapCache};
use fibsvc_core::{ComputeService, FibCache, Strategy};
use fibsvc_http::{build_cors_layer, build_router, AppState, CorsOptions, PROCESS_TIME_HEADER};

fn router_with(strategy: Strategy, cache: Option<Arc<dyn FibCache>>) -> Router {
    let service = Arc::new(ComputeService::new(strategy, cache).unwrap());
    build_router(AppState::new(service, "rust-api"), None)
}

fn iterative_router() -> Router {
    router_with(Strategy::Iterative, None)
}

async fn get(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn compute_size_10() {
    let (status, json) = get(iterative_router(), "/compute?size=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"], 55);
    assert_eq!(json["size"], 10);
    assert!(json["latency_ms"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn compute_without_query_uses_default() {
    let (status, json) = get(iterative_router(), "/compute").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"], 832040);
    assert_eq!(json["size"], 30);
}

#[tokio::test]
async fn compute_out_of_range_uses_default() {
    for uri in [
        "/compute?size=999",
        "/compute?size=-1",
        "/compute?size=abc",
        "/compute?size=",
        "/compute?size=10.5",
        "/compute?other=5",
    ] {
        let (status, json) = get(iterative_router(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json["result"], 832040, "{uri}");
        assert_eq!(json["size"], 30, "{uri}");
    }
}

#[tokio::test]
async fn compute_upper_bound() {
    let (_, json) = get(iterative_router(), "/compute?size=50").await;
    assert_eq!(json["result"], 12586269025u64);
    assert_eq!(json["size"], 50);
}

#[tokio::test]
async fn compute_every_strategy() {
    let routers = [
        router_with(Strategy::Recursive, None),
        router_with(Strategy::Memoized, Some(Arc::new(MapCache::new()))),
        router_with(Strategy::Hybrid, Some(Arc::new(LruCache::default()))),
        iterative_router(),
    ];
    for router in routers {
        let (status, json) = get(router, "/compute?size=20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"], 6765);
    }
}

#[tokio::test]
async fn compute_sets_process_time_header() {
    let response = iterative_router()
        .oneshot(Request::get("/compute?size=5").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let header = response.headers().get(PROCESS_TIME_HEADER).unwrap();
    let secs: f64 = header.to_str().unwrap().parse().unwrap();
    assert!(secs >= 0.0);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn health_is_healthy() {
    let (status, json) = get(iterative_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "rust-api");
    assert_eq!(json["test_result"], 55);
}

#[tokio::test]
async fn root_lists_endpoints() {
    let (status, json) = get(iterative_router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["service"], "rust-api");
    assert_eq!(json["strategy"], "iterative");
    assert!(json["version"].is_string());
    assert_eq!(json["endpoints"]["compute"], "/compute?size=30");
    assert_eq!(json["endpoints"]["health"], "/health");
}

#[tokio::test]
async fn stats_count_compute_requests() {
    let router = router_with(Strategy::Memoized, Some(Arc::new(MapCache::new())));
    for _ in 0..3 {
        let (status, _) = get(router.clone(), "/compute?size=25").await;
        assert_eq!(status, StatusCode::OK);
    }
    // Health checks are not counted.
    get(router.clone(), "/health").await;

    let (status, json) = get(router, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["requests"], 3);
    assert!(json["total_compute_ms"].as_f64().unwrap() >= 0.0);
    // 24 entries (2..=25); the self-check only hits existing ones.
    assert_eq!(json["cache"]["entries"], 24);
    assert!(json["cache"]["hits"].as_u64().unwrap() >= 2);
    assert!(json["cache"]["hit_rate"].as_f64().unwrap() > 0.0);
    assert!(json["cache"]["capacity"].is_null());
}

#[tokio::test]
async fn stats_without_cache() {
    let (_, json) = get(iterative_router(), "/stats").await;
    assert_eq!(json["requests"], 0);
    assert!(json["cache"].is_null());
}

#[tokio::test]
async fn unknown_path_is_404() {
    let (status, json) = get(iterative_router(), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not found");
}

#[tokio::test]
async fn concurrent_requests_agree() {
    let router = router_with(Strategy::Memoized, Some(Arc::new(MapCache::new())));
    let mut tasks = Vec::new();
    for _ in 0..16 {
        let router = router.clone();
        tasks.push(tokio::spawn(
            async move { get(router, "/compute?size=45").await },
        ));
    }
    for task in tasks {
        let (status, json) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"], 1134903170);
    }
}

#[tokio::test]
async fn cors_preflight_allows_get() {
    let service = Arc::new(ComputeService::new(Strategy::Iterative, None).unwrap());
    let router = build_router(
        AppState::new(service, "rust-api"),
        build_cors_layer(&CorsOptions::default()),
    );
    let response = router
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/compute")
                .header("origin", "http://example.com")
                .header("access-control-request-method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
