//! PostgreSQL goal store, one connection per call.

use async_trait::async_trait;
use sqlx::{Connection, PgConnection};

use goaltrack_core::error::{GoalsError, Result};
use goaltrack_core::goal::{Goal, GoalId};

use super::{DbSettings, GoalStore};
use crate::config::SslMode;

pub struct PgGoalStore {
    settings: DbSettings,
    ssl_mode: SslMode,
}

impl PgGoalStore {
    pub fn new(settings: DbSettings, ssl_mode: SslMode) -> Self {
        Self { settings, ssl_mode }
    }

    /// Open a brand-new session. The caller owns it; dropping it on an error
    /// path closes the socket.
    async fn connect(&self) -> Result<PgConnection> {
        let opts = self.settings.connect_options(self.ssl_mode).inspect_err(|e| {
            tracing::warn!(error = %e, "error while connecting to PostgreSQL");
        })?;

        PgConnection::connect_with(&opts).await.map_err(|e| {
            tracing::warn!(error = %e, "error while connecting to PostgreSQL");
            GoalsError::Unavailable(e.to_string())
        })
    }
}

async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "connection close failed");
    }
}

fn statement_error(op: &'static str) -> impl FnOnce(sqlx::Error) -> GoalsError {
    move |e| {
        tracing::error!(op, error = %e, "goal statement failed");
        GoalsError::Database(e.to_string())
    }
}

#[async_trait]
impl GoalStore for PgGoalStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<Goal>> {
        let mut conn = self.connect().await?;
        let rows: Vec<(GoalId, Option<String>)> = sqlx::query_as("SELECT id, goal_name FROM goals")
            .fetch_all(&mut conn)
            .await
            .map_err(statement_error("list"))?;
        close(conn).await;

        Ok(rows
            .into_iter()
            .map(|(id, goal_name)| Goal::new(id, goal_name.unwrap_or_default()))
            .collect())
    }

    async fn add(&self, goal_name: &str) -> Result<()> {
        let mut conn = self.connect().await?;
        sqlx::query("INSERT INTO goals (goal_name) VALUES ($1)")
            .bind(goal_name)
            .execute(&mut conn)
            .await
            .map_err(statement_error("add"))?;
        close(conn).await;
        Ok(())
    }

    async fn remove(&self, id: GoalId) -> Result<u64> {
        let mut conn = self.connect().await?;
        let removed = sqlx::query("DELETE FROM goals WHERE id = $1")
            .bind(id)
            .execute(&mut conn)
            .await
            .map_err(statement_error("remove"))?
            .rows_affected();
        close(conn).await;
        Ok(removed)
    }
}
