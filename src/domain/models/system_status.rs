use serde::{Deserialize, Serialize};

/// Reachability of the upstream gateway as seen from its health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    /// Health endpoint answered with a 2xx status.
    Online,
    /// Health endpoint answered, but with a non-2xx status.
    Error,
    /// No HTTP response at all.
    Offline,
}

impl ServiceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceState::Online => "online",
            ServiceState::Error => "error",
            ServiceState::Offline => "offline",
        }
    }
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    status: ServiceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    server_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl SystemStatus {
    /// Status for an endpoint that produced an HTTP response.
    pub fn from_response(status_code: u16, server_info: Option<String>) -> Self {
        let status = if (200..300).contains(&status_code) {
            ServiceState::Online
        } else {
            ServiceState::Error
        };

        Self {
            status,
            status_code: Some(status_code),
            server_info,
            error: None,
        }
    }

    pub fn offline(error: impl Into<String>) -> Self {
        Self {
            status: ServiceState::Offline,
            status_code: None,
            server_info: None,
            error: Some(error.into()),
        }
    }

    pub fn status(&self) -> ServiceState {
        self.status
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn server_info(&self) -> Option<&str> {
        self.server_info.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_online(&self) -> bool {
        self.status == ServiceState::Online
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_classifies_status() {
        assert!(SystemStatus::from_response(200, None).is_online());
        assert!(SystemStatus::from_response(204, None).is_online());

        let degraded = SystemStatus::from_response(503, Some("nginx".to_string()));
        assert_eq!(degraded.status(), ServiceState::Error);
        assert_eq!(degraded.status_code(), Some(503));
        assert_eq!(degraded.server_info(), Some("nginx"));
        assert_eq!(degraded.error(), None);
    }

    #[test]
    fn test_offline_carries_error() {
        let status = SystemStatus::offline("connection refused");

        assert_eq!(status.status(), ServiceState::Offline);
        assert_eq!(status.status_code(), None);
        assert_eq!(status.error(), Some("connection refused"));
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let json = serde_json::to_value(SystemStatus::from_response(500, None)).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["statusCode"], 500);
        assert!(json.get("error").is_none());
    }
}
