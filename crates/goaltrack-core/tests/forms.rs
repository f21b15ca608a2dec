//! Write-route form payload tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use goaltrack_core::error::ClientCode;
use goaltrack_core::{AddGoalForm, RemoveGoalForm};

#[test]
fn add_form_takes_present_name() {
    let form: AddGoalForm = serde_urlencoded::from_str("goal_name=Run5k").unwrap();
    assert_eq!(form.name(), Some("Run5k"));
}

#[test]
fn add_form_decodes_escaped_name() {
    let form: AddGoalForm = serde_urlencoded::from_str("goal_name=Read+a+book%21").unwrap();
    assert_eq!(form.name(), Some("Read a book!"));
}

#[test]
fn add_form_missing_or_empty_is_noop() {
    let missing: AddGoalForm = serde_urlencoded::from_str("").unwrap();
    assert_eq!(missing.name(), None);

    let empty: AddGoalForm = serde_urlencoded::from_str("goal_name=").unwrap();
    assert_eq!(empty.name(), None);
}

#[test]
fn add_form_keeps_whitespace_only_name() {
    let blank: AddGoalForm = serde_urlencoded::from_str("goal_name=+++").unwrap();
    assert_eq!(blank.name(), Some("   "));
}

#[test]
fn add_form_ignores_unknown_fields() {
    let form: AddGoalForm = serde_urlencoded::from_str("submit=Add&goal_name=Swim").unwrap();
    assert_eq!(form.name(), Some("Swim"));
}

#[test]
fn remove_form_parses_id() {
    let form: RemoveGoalForm = serde_urlencoded::from_str("goal_id=42").unwrap();
    assert_eq!(form.id().unwrap(), Some(42));

    let padded: RemoveGoalForm = serde_urlencoded::from_str("goal_id=+7+").unwrap();
    assert_eq!(padded.id().unwrap(), Some(7));
}

#[test]
fn remove_form_missing_is_noop() {
    let missing: RemoveGoalForm = serde_urlencoded::from_str("").unwrap();
    assert_eq!(missing.id().unwrap(), None);

    let empty: RemoveGoalForm = serde_urlencoded::from_str("goal_id=").unwrap();
    assert_eq!(empty.id().unwrap(), None);
}

#[test]
fn remove_form_rejects_non_numeric_id() {
    let form: RemoveGoalForm = serde_urlencoded::from_str("goal_id=abc").unwrap();
    let err = form.id().expect_err("must fail");
    assert_eq!(err.client_code(), ClientCode::BadRequest);
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn remove_form_rejects_whitespace_only_id() {
    let form: RemoveGoalForm = serde_urlencoded::from_str("goal_id=+++").unwrap();
    let err = form.id().expect_err("must fail");
    assert_eq!(err.client_code(), ClientCode::BadRequest);
}
