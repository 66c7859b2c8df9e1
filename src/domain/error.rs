use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Received HTML response instead of API data")]
    UnexpectedHtmlResponse,

    #[error("Authentication failed. Please check your API key.")]
    AuthenticationFailed,

    #[error("API endpoint not found. Please check the URL configuration.")]
    EndpointNotFound,

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl GatewayError {
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimitExceeded(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportFailure(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Statuses with a dedicated meaning; any other failure status is a
    /// plain transport failure.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(Self::AuthenticationFailed),
            404 => Some(Self::EndpointNotFound),
            429 => Some(Self::rate_limited("upstream reported HTTP 429")),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded(_))
    }

    pub fn is_html_response(&self) -> bool {
        matches!(self, Self::UnexpectedHtmlResponse)
    }

    pub fn is_authentication_failed(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }

    pub fn is_endpoint_not_found(&self) -> bool {
        matches!(self, Self::EndpointNotFound)
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }
}
