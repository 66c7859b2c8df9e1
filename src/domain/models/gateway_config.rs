use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_RATE_LIMIT: u32 = 10;

const CHAT_COMPLETIONS_PATH: &str = "/api/chat/completions";
const MODELS_PATH: &str = "/api/models";
const HEALTH_PATH: &str = "/api/health";
const OLLAMA_TAGS_PATH: &str = "/ollama/api/tags";

pub const PROMPT_TIMEOUT: Duration = Duration::from_secs(30);
pub const LISTING_TIMEOUT: Duration = Duration::from_secs(10);
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Lifetime of a cached model listing.
pub const MODEL_CACHE_TTL: Duration = Duration::from_secs(300);

/// Where the upstream gateway lives and how calls to it are bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: String,
    api_key: String,
    default_model: String,
    rate_limit_per_minute: u32,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            base_url: base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            default_model: DEFAULT_MODEL.to_string(),
            rate_limit_per_minute: DEFAULT_RATE_LIMIT,
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable                   | Default                 |
    /// |----------------------------|-------------------------|
    /// | `OPEN_WEBUI_URL`           | `http://localhost:3000` |
    /// | `OPEN_WEBUI_API_KEY`       | `""` (empty)            |
    /// | `OPEN_WEBUI_DEFAULT_MODEL` | `gpt-4o`                |
    /// | `RATE_LIMIT`               | `10`                    |
    pub fn from_env() -> Self {
        let base = std::env::var("OPEN_WEBUI_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let key = std::env::var("OPEN_WEBUI_API_KEY").unwrap_or_default();
        let mut config = Self::new(base, key);

        if let Ok(model) = std::env::var("OPEN_WEBUI_DEFAULT_MODEL") {
            config = config.with_default_model(model);
        }
        if let Ok(raw) = std::env::var("RATE_LIMIT") {
            config = config.with_rate_limit(parse_rate_limit(&raw));
        }
        config
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        let model: String = model.into();
        if !model.trim().is_empty() {
            self.default_model = model;
        }
        self
    }

    /// Zero is not a usable limit and falls back to the default.
    pub fn with_rate_limit(mut self, per_minute: u32) -> Self {
        self.rate_limit_per_minute = if per_minute == 0 {
            DEFAULT_RATE_LIMIT
        } else {
            per_minute
        };
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn rate_limit_per_minute(&self) -> u32 {
        self.rate_limit_per_minute
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH)
    }

    pub fn models_url(&self) -> String {
        format!("{}{}", self.base_url, MODELS_PATH)
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, HEALTH_PATH)
    }

    pub fn ollama_tags_url(&self) -> String {
        format!("{}{}", self.base_url, OLLAMA_TAGS_PATH)
    }
}

fn parse_rate_limit(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(DEFAULT_RATE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = GatewayConfig::new("https://webui.example.com/", "sk-1");

        assert_eq!(
            config.chat_completions_url(),
            "https://webui.example.com/api/chat/completions"
        );
        assert_eq!(config.models_url(), "https://webui.example.com/api/models");
        assert_eq!(config.health_url(), "https://webui.example.com/api/health");
        assert_eq!(
            config.ollama_tags_url(),
            "https://webui.example.com/ollama/api/tags"
        );
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::new(DEFAULT_BASE_URL, "");

        assert_eq!(config.default_model(), DEFAULT_MODEL);
        assert_eq!(config.rate_limit_per_minute(), DEFAULT_RATE_LIMIT);
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_zero_rate_limit_falls_back() {
        let config = GatewayConfig::new(DEFAULT_BASE_URL, "").with_rate_limit(0);
        assert_eq!(config.rate_limit_per_minute(), DEFAULT_RATE_LIMIT);
    }

    #[test]
    fn test_blank_model_is_ignored() {
        let config = GatewayConfig::new(DEFAULT_BASE_URL, "").with_default_model("  ");
        assert_eq!(config.default_model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_parse_rate_limit() {
        assert_eq!(parse_rate_limit(" 25 "), 25);
        assert_eq!(parse_rate_limit("lots"), DEFAULT_RATE_LIMIT);
    }
}
