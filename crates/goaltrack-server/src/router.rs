//! Axum router wiring.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, handlers, obs, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::goals::index))
        .route("/add_goal", post(handlers::goals::add_goal))
        .route("/remove_goal", post(handlers::goals::remove_goal))
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            obs::track::track_request_metrics,
        ))
        .with_state(state)
}
