pub mod ask_controller;
pub mod models_controller;
pub mod ping_controller;
pub mod status_controller;

pub use ask_controller::AskController;
pub use models_controller::ModelsController;
pub use ping_controller::PingController;
pub use status_controller::StatusController;

use crate::domain::GatewayError;

/// Longest text block a single reply carries.
pub const MAX_REPLY_CHARS: usize = 4000;

/// Cuts `text` to [`MAX_REPLY_CHARS`] characters, returning the overflow.
pub fn truncate_reply(text: &str) -> (String, usize) {
    let total = text.chars().count();
    if total <= MAX_REPLY_CHARS {
        return (text.to_string(), 0);
    }
    (text.chars().take(MAX_REPLY_CHARS).collect(), total - MAX_REPLY_CHARS)
}

/// User-facing explanation for each failure the gateway client reports.
pub fn describe_error(error: &GatewayError) -> String {
    match error {
        GatewayError::RateLimitExceeded(detail) => {
            format!("Rate limit exceeded. Please try again later. ({detail})")
        }
        GatewayError::UnexpectedHtmlResponse => "Received HTML page instead of API response. \
Your Open WebUI instance may be returning its web interface instead of API data.\n\n\
Please check that:\n\
1. The API paths are whitelisted in your authentication proxy\n\
2. Your Open WebUI version supports the API endpoints being used"
            .to_string(),
        GatewayError::AuthenticationFailed | GatewayError::EndpointNotFound => error.to_string(),
        GatewayError::TransportFailure(detail) => detail.clone(),
        GatewayError::InvalidInput(detail) => format!("Invalid input: {detail}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_reply_counts_characters() {
        let short = "é".repeat(MAX_REPLY_CHARS);
        assert_eq!(truncate_reply(&short), (short.clone(), 0));

        let long = "é".repeat(MAX_REPLY_CHARS + 7);
        let (cut, overflow) = truncate_reply(&long);
        assert_eq!(cut.chars().count(), MAX_REPLY_CHARS);
        assert_eq!(overflow, 7);
    }

    #[test]
    fn test_each_error_has_distinct_text() {
        let errors = [
            GatewayError::rate_limited("Maximum 10 requests per minute."),
            GatewayError::UnexpectedHtmlResponse,
            GatewayError::AuthenticationFailed,
            GatewayError::EndpointNotFound,
            GatewayError::transport("Failed to send message: connection failed"),
        ];
        let texts: Vec<_> = errors.iter().map(describe_error).collect();

        for (i, a) in texts.iter().enumerate() {
            for b in &texts[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(texts[1].contains("HTML page"));
        assert_eq!(texts[2], "Authentication failed. Please check your API key.");
    }
}
