use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::NormalizedResponse;

/// Content reported when a body could not be interpreted at all.
pub const EXTRACTION_FAILED: &str = "Error extracting response content";

/// Flat fields probed for content, first present wins.
const FLAT_CONTENT_FIELDS: [&str; 6] = [
    "text",
    "content",
    "message",
    "response",
    "output",
    "generated_text",
];

#[derive(Debug, Error)]
enum ExtractionError {
    #[error("response body is null")]
    NullBody,

    #[error("failed to serialize response body: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The shapes an upstream body is recognised as, in priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape<'a> {
    /// OpenAI-style `{choices: [...]}`, carrying the first choice.
    ChatCompletion(&'a Value),
    /// The whole body is text.
    PlainText(&'a str),
    /// One of the well-known flat content fields.
    FlatField {
        field: &'static str,
        value: &'a Value,
    },
    /// Nothing recognisable; the body itself becomes the content.
    Unrecognized,
}

impl<'a> ResponseShape<'a> {
    pub fn name(&self) -> &'static str {
        match self {
            ResponseShape::ChatCompletion(_) => "chat_completion",
            ResponseShape::PlainText(_) => "plain_text",
            ResponseShape::FlatField { .. } => "flat_field",
            ResponseShape::Unrecognized => "unrecognized",
        }
    }

    fn classify(body: &'a Value) -> Result<Self, ExtractionError> {
        if body.is_null() {
            return Err(ExtractionError::NullBody);
        }

        let shape = Self::chat_completion(body)
            .or_else(|| Self::plain_text(body))
            .or_else(|| Self::flat_field(body))
            .unwrap_or(ResponseShape::Unrecognized);
        Ok(shape)
    }

    fn chat_completion(body: &'a Value) -> Option<Self> {
        body.get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .map(ResponseShape::ChatCompletion)
    }

    fn plain_text(body: &'a Value) -> Option<Self> {
        body.as_str().map(ResponseShape::PlainText)
    }

    fn flat_field(body: &'a Value) -> Option<Self> {
        FLAT_CONTENT_FIELDS.iter().find_map(|field| {
            present(body.get(*field)).map(|value| ResponseShape::FlatField {
                field: *field,
                value,
            })
        })
    }
}

/// Maps heterogeneous upstream bodies onto [`NormalizedResponse`].
///
/// Normalization never fails: a body that cannot be interpreted degrades to
/// [`EXTRACTION_FAILED`] content with the body preserved in `raw`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &Value) -> NormalizedResponse {
        match Self::extract(body) {
            Ok(response) => response,
            Err(e) => {
                warn!("Could not extract response content: {}", e);
                NormalizedResponse::new(EXTRACTION_FAILED, None, body.clone())
            }
        }
    }

    fn extract(body: &Value) -> Result<NormalizedResponse, ExtractionError> {
        let shape = ResponseShape::classify(body)?;
        debug!("Upstream body recognised as {}", shape.name());

        let content = match shape {
            ResponseShape::ChatCompletion(choice) => {
                let from_message = present(choice.get("message").and_then(|m| m.get("content")));
                from_message
                    .or_else(|| present(choice.get("text")))
                    .map(value_text)
                    .unwrap_or_else(|| choice.to_string())
            }
            ResponseShape::PlainText(text) => text.to_string(),
            ResponseShape::FlatField { value, .. } => value_text(value),
            ResponseShape::Unrecognized => serde_json::to_string_pretty(body)?,
        };

        let model = match shape {
            ResponseShape::PlainText(_) => None,
            _ => top_level_model(body),
        };

        Ok(NormalizedResponse::new(content, model, body.clone()))
    }
}

/// A field counts as present unless it is null, `false`, zero or an empty
/// string.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| match v {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        _ => true,
    })
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn top_level_model(body: &Value) -> Option<String> {
    body.get("model")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UNKNOWN_MODEL;
    use serde_json::json;

    fn normalize(body: Value) -> NormalizedResponse {
        ResponseNormalizer::new().normalize(&body)
    }

    #[test]
    fn test_false_and_zero_fields_are_skipped() {
        let response = normalize(json!({"text": false, "content": 0, "message": "real"}));
        assert_eq!(response.content(), "real");

        let response = normalize(json!({
            "choices": [{"message": {"content": false}, "text": "from text"}]
        }));
        assert_eq!(response.content(), "from text");
    }

    #[test]
    fn test_chat_completion_message_content() {
        let response = normalize(json!({
            "choices": [{"message": {"role": "assistant", "content": "X"}}],
            "model": "M"
        }));

        assert_eq!(response.content(), "X");
        assert_eq!(response.model(), "M");
    }

    #[test]
    fn test_chat_completion_text_without_model() {
        let response = normalize(json!({"choices": [{"text": "X"}]}));

        assert_eq!(response.content(), "X");
        assert_eq!(response.model(), UNKNOWN_MODEL);
    }

    #[test]
    fn test_chat_completion_empty_message_falls_back_to_text() {
        let response = normalize(json!({
            "choices": [{"message": {"content": ""}, "text": "legacy"}]
        }));

        assert_eq!(response.content(), "legacy");
    }

    #[test]
    fn test_chat_completion_serializes_unknown_choice() {
        let response = normalize(json!({"choices": [{"delta": "d"}], "model": "M"}));

        assert_eq!(response.content(), r#"{"delta":"d"}"#);
        assert_eq!(response.model(), "M");
    }

    #[test]
    fn test_empty_choices_is_not_a_chat_completion() {
        let response = normalize(json!({"choices": [], "response": "flat"}));

        assert_eq!(response.content(), "flat");
    }

    #[test]
    fn test_plain_string_body() {
        let response = normalize(json!("hello"));

        assert_eq!(response.content(), "hello");
        assert_eq!(response.model(), UNKNOWN_MODEL);
        assert_eq!(response.raw(), &json!("hello"));
    }

    #[test]
    fn test_flat_fields_follow_priority_order() {
        let response = normalize(json!({
            "output": "second",
            "content": "first",
            "model": "llama3"
        }));

        assert_eq!(response.content(), "first");
        assert_eq!(response.model(), "llama3");
    }

    #[test]
    fn test_flat_field_skips_empty_values() {
        let response = normalize(json!({"text": "", "message": null, "generated_text": "gen"}));

        assert_eq!(response.content(), "gen");
    }

    #[test]
    fn test_flat_field_non_string_is_rendered_as_json() {
        let response = normalize(json!({"message": {"role": "assistant"}}));

        assert_eq!(response.content(), r#"{"role":"assistant"}"#);
    }

    #[test]
    fn test_unrecognized_body_is_pretty_printed() {
        let body = json!({"id": "abc", "model": "M"});
        let response = normalize(body.clone());

        assert_eq!(
            response.content(),
            serde_json::to_string_pretty(&body).unwrap()
        );
        assert_eq!(response.model(), "M");
        assert_eq!(response.raw(), &body);
    }

    #[test]
    fn test_non_string_model_is_ignored() {
        let response = normalize(json!({"text": "t", "model": 7}));

        assert_eq!(response.model(), UNKNOWN_MODEL);
    }

    #[test]
    fn test_null_body_degrades() {
        let response = normalize(Value::Null);

        assert_eq!(response.content(), EXTRACTION_FAILED);
        assert_eq!(response.model(), UNKNOWN_MODEL);
        assert_eq!(response.raw(), &Value::Null);
    }

    #[test]
    fn test_shape_names() {
        let body = json!({"choices": [{"text": "x"}]});
        let shape = ResponseShape::classify(&body).unwrap();

        assert_eq!(shape.name(), "chat_completion");
        assert!(ResponseShape::classify(&Value::Null).is_err());
    }
}
