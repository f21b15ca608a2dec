//! goaltrack core: the goal entity, form payloads, and the shared error type.
//!
//! This crate carries no transport, database, or runtime dependencies so the
//! server and its tests can share one vocabulary.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible
//! paths surface as `GoalsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod goal;

/// Shared result type.
pub use error::{GoalsError, Result};
pub use goal::{AddGoalForm, Goal, GoalId, RemoveGoalForm};
