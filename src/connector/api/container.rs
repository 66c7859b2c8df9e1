use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::application::{Clock, CooldownTracker, GatewayClient, HttpTransport};
use crate::connector::{ReqwestTransport, SystemClock};
use crate::domain::GatewayConfig;

/// Command-line overrides applied on top of the environment.
#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    pub base_url: Option<String>,
    pub default_model: Option<String>,
    pub rate_limit: Option<u32>,
}

impl ContainerConfig {
    pub fn gateway_config(&self) -> GatewayConfig {
        let mut gateway = GatewayConfig::from_env();

        if let Some(url) = &self.base_url {
            gateway = GatewayConfig::new(url.clone(), gateway.api_key().to_string())
                .with_default_model(gateway.default_model().to_string())
                .with_rate_limit(gateway.rate_limit_per_minute());
        }
        if let Some(model) = &self.default_model {
            gateway = gateway.with_default_model(model.clone());
        }
        if let Some(limit) = self.rate_limit {
            gateway = gateway.with_rate_limit(limit);
        }
        gateway
    }
}

pub struct Container {
    gateway_client: Arc<GatewayClient>,
    cooldowns: Arc<CooldownTracker>,
    started_at: Instant,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let gateway = config.gateway_config();

        info!("Open WebUI gateway configured with URL: {}", gateway.base_url());
        info!(
            "Authentication: Using API Key {}",
            if gateway.has_api_key() {
                "(configured)"
            } else {
                "(missing)"
            }
        );
        debug!(
            "Default model {}, rate limit {} per minute",
            gateway.default_model(),
            gateway.rate_limit_per_minute()
        );

        Self::with_transport(gateway, Arc::new(ReqwestTransport::new()), Arc::new(SystemClock))
    }

    /// Wires the container around an explicit transport and clock.
    pub fn with_transport(
        gateway: GatewayConfig,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gateway_client: Arc::new(GatewayClient::new(transport, gateway, Arc::clone(&clock))),
            cooldowns: Arc::new(CooldownTracker::new(clock)),
            started_at: Instant::now(),
        }
    }

    pub fn gateway_client(&self) -> Arc<GatewayClient> {
        self.gateway_client.clone()
    }

    pub fn cooldowns(&self) -> Arc<CooldownTracker> {
        self.cooldowns.clone()
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn gateway_config(&self) -> &GatewayConfig {
        self.gateway_client.config()
    }
}
