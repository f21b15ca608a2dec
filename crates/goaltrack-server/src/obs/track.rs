//! Before/after instrumentation for every request.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::Metrics;
use crate::app_state::AppState;

/// Holds the in-progress gauge up for one request. Dropping it (normal
/// completion, panic unwind, or a dropped future) brings the gauge back down.
struct InFlight<'a>(&'a Metrics);

impl<'a> InFlight<'a> {
    fn enter(metrics: &'a Metrics) -> Self {
        metrics.in_progress.inc();
        Self(metrics)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_progress.dec();
    }
}

/// axum layer: start timer and bump the gauge, run the handler, then record
/// count, summary and histogram under (method, request path).
pub async fn track_request_metrics(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let metrics = state.metrics();
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    let _in_flight = InFlight::enter(&metrics);
    let started = Instant::now();

    let response = next.run(req).await;

    let elapsed = started.elapsed();
    metrics.observe_request(&method, &path, elapsed);
    tracing::debug!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = elapsed.as_secs_f64() * 1000.0,
        "request finished"
    );

    response
}
