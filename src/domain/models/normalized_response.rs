use serde::Serialize;
use serde_json::Value;

/// Placeholder used whenever the upstream does not name the model it ran.
pub const UNKNOWN_MODEL: &str = "Unknown model";

/// Uniform view over whatever shape the upstream gateway answered with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResponse {
    content: String,
    model: String,
    /// Parsed upstream body, kept for diagnostics.
    raw: Value,
}

impl NormalizedResponse {
    pub fn new(content: impl Into<String>, model: Option<String>, raw: Value) -> Self {
        Self {
            content: content.into(),
            model: model.unwrap_or_else(|| UNKNOWN_MODEL.to_string()),
            raw,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn has_known_model(&self) -> bool {
        self.model != UNKNOWN_MODEL
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
