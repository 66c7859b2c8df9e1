//! Pure interpretation of raw upstream bodies.

mod html_guard;
mod response_normalizer;

pub use html_guard::*;
pub use response_normalizer::*;
