//! # Domain Layer
//!
//! Values exchanged with the upstream gateway, the error taxonomy, and the
//! pure services that interpret raw upstream bodies.
//! This layer is independent of the HTTP client and the runtime.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
