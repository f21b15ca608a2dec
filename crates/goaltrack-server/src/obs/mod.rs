//! Request metrics (dependency-light).
//!
//! `metrics` holds the registry and its Prometheus text rendering; `track`
//! is the axum layer that feeds it before and after every request.

pub mod metrics;
pub mod track;

pub use metrics::Metrics;
