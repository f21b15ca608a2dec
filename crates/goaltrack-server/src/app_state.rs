//! Shared application state: the goal store and the metrics registry.

use std::sync::Arc;

use crate::db::GoalStore;
use crate::obs::Metrics;

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn GoalStore>,
    metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(store: Arc<dyn GoalStore>) -> Self {
        Self::with_metrics(store, Arc::new(Metrics::new()))
    }

    /// Build state around an existing registry so callers can keep a handle
    /// on it.
    pub fn with_metrics(store: Arc<dyn GoalStore>, metrics: Arc<Metrics>) -> Self {
        Self { store, metrics }
    }

    pub fn store(&self) -> Arc<dyn GoalStore> {
        Arc::clone(&self.store)
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }
}
