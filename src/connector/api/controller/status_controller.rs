use anyhow::Result;
use tracing::info;

use crate::domain::SystemStatus;

use super::super::Container;

pub struct StatusController<'a> {
    container: &'a Container,
}

impl<'a> StatusController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn status(&self) -> Result<String> {
        info!("Fetching Open WebUI status...");
        let status = self.container.gateway_client().get_system_status().await;
        Ok(self.format_status(&status))
    }

    fn format_status(&self, status: &SystemStatus) -> String {
        let mut output = "Open WebUI Status\n=================\n".to_string();
        output.push_str(&format!("Status: {}\n", status.status()));
        if let Some(code) = status.status_code() {
            output.push_str(&format!("Status Code: {}\n", code));
            output.push_str(&format!(
                "Server: {}\n",
                status.server_info().unwrap_or("Unknown")
            ));
        }
        if let Some(error) = status.error() {
            output.push_str(&format!("Error: {}\n", error));
        }
        output.push_str(&format!("Endpoint: {}", self.container.gateway_config().health_url()));
        output
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::{HttpResponse, TransportError};
    use crate::connector::{ManualClock, MockTransport};
    use crate::domain::GatewayConfig;

    fn container(mock: &Arc<MockTransport>) -> Container {
        let config = GatewayConfig::new("http://webui.test", "sk");
        Container::with_transport(config, mock.clone(), Arc::new(ManualClock::new(0)))
    }

    #[tokio::test]
    async fn test_online_status() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("/api/health", HttpResponse::new(200, "{}"));
        let container = container(&mock);

        let output = StatusController::new(&container).status().await.unwrap();

        assert!(output.contains("Status: online"));
        assert!(output.contains("Status Code: 200"));
        assert!(output.contains("Server: Unknown"));
        assert!(output.ends_with("Endpoint: http://webui.test/api/health"));
    }

    #[tokio::test]
    async fn test_offline_status() {
        let mock = Arc::new(MockTransport::new());
        mock.fail("/api/health", TransportError::Timeout(5_000));
        let container = container(&mock);

        let output = StatusController::new(&container).status().await.unwrap();

        assert!(output.contains("Status: offline"));
        assert!(output.contains("Error: timeout of 5000ms exceeded"));
        assert!(!output.contains("Status Code"));
    }
}
