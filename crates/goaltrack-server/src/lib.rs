//! goaltrack server library entry.
//!
//! Wires config, the goal store, request metrics, and the HTTP routes into
//! one axum application. Consumed by the binary (`main.rs`) and by the
//! integration tests.

pub mod app_state;
pub mod config;
pub mod db;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod router;
pub mod view;
