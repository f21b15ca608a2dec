//! Top-level facade crate for goaltrack.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use goaltrack_core::*;
}

pub mod server {
    pub use goaltrack_server::*;
}
