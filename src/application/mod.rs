//! # Application Layer
//!
//! Ports to the outside world and the services that call the upstream
//! gateway through them.

pub mod interfaces;
pub mod services;

pub use interfaces::*;
pub use services::*;
