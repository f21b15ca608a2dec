//! Goal entity and the form payloads of the write routes.

use serde::Deserialize;

use crate::error::{GoalsError, Result};

/// Database-assigned goal identifier (`SERIAL`).
pub type GoalId = i32;

/// One row of the `goals` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub id: GoalId,
    pub goal_name: String,
}

impl Goal {
    pub fn new(id: GoalId, goal_name: impl Into<String>) -> Self {
        Self {
            id,
            goal_name: goal_name.into(),
        }
    }
}

/// `POST /add_goal` body (`application/x-www-form-urlencoded`).
///
/// Unknown fields are ignored; browsers may submit extra inputs.
#[derive(Debug, Default, Deserialize)]
pub struct AddGoalForm {
    #[serde(default)]
    pub goal_name: Option<String>,
}

impl AddGoalForm {
    /// The name to insert, or `None` when the field is absent or empty.
    /// Whitespace-only names are inserted as given.
    pub fn name(&self) -> Option<&str> {
        self.goal_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// `POST /remove_goal` body (`application/x-www-form-urlencoded`).
#[derive(Debug, Default, Deserialize)]
pub struct RemoveGoalForm {
    #[serde(default)]
    pub goal_id: Option<String>,
}

impl RemoveGoalForm {
    /// `Ok(None)` when the field is absent or empty; `BadRequest` for any
    /// other value that is not an integer (surrounding whitespace allowed).
    pub fn id(&self) -> Result<Option<GoalId>> {
        let raw = match self.goal_id.as_deref() {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };
        raw.trim()
            .parse::<GoalId>()
            .map(Some)
            .map_err(|e| GoalsError::BadRequest(format!("invalid goal_id {raw:?}: {e}")))
    }
}
