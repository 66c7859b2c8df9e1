//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - HTTP transport to the upstream gateway (reqwest, plus a scripted mock)
//! - Clocks (system and manual)
//! - Liveness endpoint (axum)
//! - Command controllers and the interactive shell

pub mod adapter;
pub mod api;

pub use adapter::*;
