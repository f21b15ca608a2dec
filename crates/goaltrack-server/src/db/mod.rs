//! Goal storage.
//!
//! `GoalStore` is the seam between the HTTP handlers and the database. The
//! PostgreSQL store opens a fresh connection for every call; nothing is
//! pooled or reused across requests.

pub mod memory;
pub mod postgres;
pub mod settings;

use std::sync::Arc;

use async_trait::async_trait;

use goaltrack_core::error::Result;
use goaltrack_core::goal::{Goal, GoalId};

use crate::config::{DatabaseSection, StoreBackend};

pub use memory::MemoryGoalStore;
pub use postgres::PgGoalStore;
pub use settings::DbSettings;

/// Single-table operations on `goals(id, goal_name)`.
///
/// Connection failures surface as `GoalsError::Unavailable`, statement
/// failures as `GoalsError::Database`.
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Every row, in whatever order the backend returns them.
    async fn list(&self) -> Result<Vec<Goal>>;

    async fn add(&self, goal_name: &str) -> Result<()>;

    /// Delete the row with `id`. Returns the number of rows removed (0 when
    /// the id does not exist).
    async fn remove(&self, id: GoalId) -> Result<u64>;
}

/// Build the store selected by `database.backend`.
pub fn build_store(cfg: &DatabaseSection, settings: DbSettings) -> Arc<dyn GoalStore> {
    match cfg.backend {
        StoreBackend::Postgres => Arc::new(PgGoalStore::new(settings, cfg.ssl_mode)),
        StoreBackend::Memory => Arc::new(MemoryGoalStore::new()),
    }
}
