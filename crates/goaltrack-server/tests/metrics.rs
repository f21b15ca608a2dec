//! Request instrumentation and exposition output.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceExt;

use goaltrack_server::{
    app_state::AppState,
    db::MemoryGoalStore,
    obs::{metrics, track::track_request_metrics, Metrics},
    router,
};

fn app() -> (Router, Arc<Metrics>) {
    let metrics = Arc::new(Metrics::new());
    let state = AppState::with_metrics(Arc::new(MemoryGoalStore::new()), metrics.clone());
    (router::build_router(state), metrics)
}

async fn send(app: &Router, method: &str, uri: &str) -> StatusCode {
    let resp = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    resp.status()
}

#[tokio::test]
async fn counts_requests_per_method_and_path() {
    let (app, metrics) = app();

    for _ in 0..3 {
        assert_eq!(send(&app, "GET", "/health").await, StatusCode::OK);
        assert_eq!(metrics.in_progress.get(), 0);
    }
    send(&app, "GET", "/").await;
    send(&app, "POST", "/add_goal").await;

    let health = [("method", "GET"), ("endpoint", "/health")];
    assert_eq!(metrics.request_count.get(&health), 3);
    assert_eq!(metrics.request_latency.count(&health), 3);
    assert_eq!(metrics.request_latency_histogram.buckets(&health)[5], 3);

    assert_eq!(metrics.request_count.get(&[("method", "GET"), ("endpoint", "/")]), 1);
    assert_eq!(metrics.request_count.get(&[("method", "POST"), ("endpoint", "/add_goal")]), 1);
    assert_eq!(metrics.request_count.get(&[("method", "POST"), ("endpoint", "/health")]), 0);
    assert_eq!(metrics.in_progress.get(), 0);
}

#[tokio::test]
async fn unmatched_paths_are_counted() {
    let (app, metrics) = app();
    assert_eq!(send(&app, "GET", "/nope").await, StatusCode::NOT_FOUND);
    assert_eq!(metrics.request_count.get(&[("method", "GET"), ("endpoint", "/nope")]), 1);
}

#[tokio::test]
async fn metrics_endpoint_serves_exposition() {
    let (app, _metrics) = app();
    send(&app, "GET", "/health").await;

    let resp = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(text.contains("# TYPE custom_request_count_total counter"));
    assert!(text.contains(r#"custom_request_count_total{endpoint="/health",method="GET"} 1"#));
    assert!(text.contains("# TYPE custom_request_latency_seconds summary"));
    assert!(text.contains(
        r#"custom_request_latency_seconds_count{endpoint="/health",method="GET"} 1"#
    ));
    // the scrape itself is still in flight while rendering
    assert!(text.contains("custom_in_progress_requests 1"));
    assert!(text.contains("# TYPE custom_request_latency_histogram_seconds histogram"));
    assert!(text.contains(
        r#"custom_request_latency_histogram_seconds_bucket{endpoint="/health",method="GET",le="+Inf"} 1"#
    ));
}

#[test]
fn histogram_buckets_are_cumulative() {
    let m = Metrics::new();
    let labels = [("method", "GET"), ("endpoint", "/")];
    m.observe_request("GET", "/", Duration::from_millis(50));
    m.observe_request("GET", "/", Duration::from_millis(700));
    m.observe_request("GET", "/", Duration::from_millis(1500));
    m.observe_request("GET", "/", Duration::from_secs(10));

    assert_eq!(m.request_latency_histogram.buckets(&labels), [1, 1, 2, 3, 3, 4]);

    let text = m.render();
    let name = metrics::REQUEST_LATENCY_HISTOGRAM;
    assert!(text.contains(&format!(r#"{name}_bucket{{endpoint="/",method="GET",le="0.1"}} 1"#)));
    assert!(text.contains(&format!(r#"{name}_bucket{{endpoint="/",method="GET",le="1.0"}} 2"#)));
    assert!(text.contains(&format!(r#"{name}_bucket{{endpoint="/",method="GET",le="5.0"}} 3"#)));
    assert!(text.contains(&format!(r#"{name}_sum{{endpoint="/",method="GET"}} 12.25"#)));
}

#[test]
fn label_values_are_escaped() {
    let m = Metrics::new();
    m.observe_request("GET", "/a\"b", Duration::from_millis(1));
    assert!(m.render().contains(r#"endpoint="/a\"b""#));
}

#[test]
fn fresh_registry_renders_zero_gauge() {
    let text = Metrics::new().render();
    assert!(text.contains("custom_in_progress_requests 0"));
    assert!(!text.contains("custom_request_count_total{"));
}

async fn panicking_handler() -> &'static str {
    panic!("handler blew up")
}

async fn hanging_handler() -> &'static str {
    std::future::pending().await
}

/// Routes whose handlers never finish normally, behind the metrics layer.
fn misbehaving_app() -> (Router, Arc<Metrics>) {
    let metrics = Arc::new(Metrics::new());
    let state = AppState::with_metrics(Arc::new(MemoryGoalStore::new()), metrics.clone());
    let app = Router::new()
        .route("/panic", get(panicking_handler))
        .route("/hang", get(hanging_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            track_request_metrics,
        ))
        .with_state(state);
    (app, metrics)
}

#[tokio::test]
async fn gauge_recovers_after_handler_panic() {
    let (app, metrics) = misbehaving_app();

    let joined = tokio::spawn(async move {
        app.oneshot(Request::builder().uri("/panic").body(Body::empty()).unwrap())
            .await
    })
    .await;

    assert!(joined.expect_err("handler must panic").is_panic());
    assert_eq!(metrics.in_progress.get(), 0);
}

#[tokio::test]
async fn gauge_recovers_after_dropped_request() {
    let (app, metrics) = misbehaving_app();

    let pending = app.oneshot(Request::builder().uri("/hang").body(Body::empty()).unwrap());
    let timed_out = tokio::time::timeout(Duration::from_millis(50), pending).await;

    assert!(timed_out.is_err());
    assert_eq!(metrics.in_progress.get(), 0);
}

#[test]
fn renders_process_start_time() {
    let m = Metrics::new();
    assert!(m.process_start.unix_secs() > 0.0);

    let text = m.render();
    assert!(text.contains("# TYPE process_start_time_seconds gauge"));
    assert!(text.contains(&format!(
        "{} {}",
        metrics::PROCESS_START_TIME,
        m.process_start.unix_secs()
    )));
}
