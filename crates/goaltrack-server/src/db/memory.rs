//! In-process goal store.
//!
//! Keeps insertion order and hands out ids from 1, like a fresh `SERIAL`
//! column. Availability can be switched off to simulate an unreachable
//! database.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use goaltrack_core::error::{GoalsError, Result};
use goaltrack_core::goal::{Goal, GoalId};

use super::GoalStore;

pub struct MemoryGoalStore {
    inner: Mutex<MemoryInner>,
    available: AtomicBool,
}

struct MemoryInner {
    next_id: GoalId,
    goals: Vec<Goal>,
}

impl Default for MemoryGoalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGoalStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                next_id: 1,
                goals: Vec::new(),
            }),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::Relaxed) {
            Ok(())
        } else {
            tracing::warn!("memory store marked unavailable");
            Err(GoalsError::Unavailable("memory store marked unavailable".into()))
        }
    }
}

#[async_trait]
impl GoalStore for MemoryGoalStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Goal>> {
        self.check_available()?;
        Ok(self.inner.lock().await.goals.clone())
    }

    async fn add(&self, goal_name: &str) -> Result<()> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id = id
            .checked_add(1)
            .ok_or_else(|| GoalsError::Database("goal id sequence exhausted".into()))?;
        inner.goals.push(Goal::new(id, goal_name));
        Ok(())
    }

    async fn remove(&self, id: GoalId) -> Result<u64> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        let before = inner.goals.len();
        inner.goals.retain(|g| g.id != id);
        Ok((before - inner.goals.len()) as u64)
    }
}
