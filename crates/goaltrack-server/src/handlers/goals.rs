//! `/`, `/add_goal`, `/remove_goal`.
//!
//! Writes are best-effort: a missing field or an unreachable database skips
//! the statement and the client is still redirected to `/`. Statement
//! failures on an open connection are 500s on every route.

use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, Redirect},
    Form,
};

use goaltrack_core::error::Result;
use goaltrack_core::goal::{AddGoalForm, RemoveGoalForm};

use super::ApiError;
use crate::{app_state::AppState, view};

pub async fn index(State(state): State<AppState>) -> std::result::Result<Html<String>, ApiError> {
    let goals = state.store().list().await?;
    Ok(Html(view::render_index(&goals)))
}

pub async fn add_goal(
    State(state): State<AppState>,
    form: std::result::Result<Form<AddGoalForm>, FormRejection>,
) -> std::result::Result<Redirect, ApiError> {
    let form = form_or_default(form);
    if let Some(name) = form.name() {
        skip_unavailable("add_goal", state.store().add(name).await)?;
    }
    Ok(Redirect::to("/"))
}

pub async fn remove_goal(
    State(state): State<AppState>,
    form: std::result::Result<Form<RemoveGoalForm>, FormRejection>,
) -> std::result::Result<Redirect, ApiError> {
    let form = form_or_default(form);
    if let Some(id) = form.id()? {
        if let Some(0) = skip_unavailable("remove_goal", state.store().remove(id).await)? {
            tracing::debug!(goal_id = id, "no goal matched");
        }
    }
    Ok(Redirect::to("/"))
}

/// An undecodable or missing body reads as "no fields".
fn form_or_default<T: Default>(form: std::result::Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(f)) => f,
        Err(rejection) => {
            tracing::debug!(%rejection, "form body ignored");
            T::default()
        }
    }
}

/// Connection failures on the write path are logged and swallowed.
fn skip_unavailable<T>(op: &'static str, res: Result<T>) -> Result<Option<T>> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_unavailable() => {
            tracing::warn!(op, error = %e, "database unavailable, write skipped");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
