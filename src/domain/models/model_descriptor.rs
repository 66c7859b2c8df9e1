use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Envelope keys probed, in order, when the model list is not a bare array.
const LIST_ENVELOPE_KEYS: [&str; 2] = ["data", "models"];

/// A model offered by the upstream gateway. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name for display; falls back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Decodes one list entry. The id comes from `id`, else from `name`.
    pub fn from_json(entry: &Value) -> Option<Self> {
        let name = non_empty_str(entry, "name");
        let id = non_empty_str(entry, "id").or(name)?;

        Some(Self {
            id: id.to_string(),
            name: name.map(str::to_string),
        })
    }

    /// Decodes a model listing: a bare array, `{data: [...]}` or
    /// `{models: [...]}`, whichever is first array-typed. Anything else is
    /// an empty listing.
    pub fn list_from_json(body: &Value) -> Vec<Self> {
        let entries = match body {
            Value::Array(entries) => Some(entries),
            Value::Object(map) => LIST_ENVELOPE_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_array)),
            _ => None,
        };

        entries
            .map(|entries| Self::decode_entries(entries, Self::from_json))
            .unwrap_or_default()
    }

    /// Decodes an Ollama `/api/tags` listing: `{models: [{name, model}]}`.
    pub fn list_from_ollama_tags(body: &Value) -> Vec<Self> {
        let Some(entries) = body.get("models").and_then(Value::as_array) else {
            return Vec::new();
        };

        Self::decode_entries(entries, |entry| {
            let name = non_empty_str(entry, "name");
            let id = non_empty_str(entry, "model").or(name)?;
            Some(Self {
                id: id.to_string(),
                name: name.map(str::to_string),
            })
        })
    }

    fn decode_entries(entries: &[Value], decode: impl Fn(&Value) -> Option<Self>) -> Vec<Self> {
        entries
            .iter()
            .filter_map(|entry| {
                let model = decode(entry);
                if model.is_none() {
                    debug!("Skipping model entry without an identifier: {}", entry);
                }
                model
            })
            .collect()
    }
}

fn non_empty_str<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
