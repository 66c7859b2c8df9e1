use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::application::{
    Clock, HttpRequest, HttpResponse, HttpTransport, RateLimiter, ResultCache,
};
use crate::domain::{
    is_html_masquerade, GatewayConfig, GatewayError, ModelDescriptor, NormalizedResponse,
    ResponseNormalizer, SystemStatus, HEALTH_TIMEOUT, LISTING_TIMEOUT, MODEL_CACHE_TTL,
    PROMPT_TIMEOUT,
};

const MODELS_CACHE_KEY: &str = "available-models";

/// Client for the upstream gateway's chat, model and health endpoints.
///
/// Owns the rate-limit window and the model-list cache, so every consumer
/// sharing one instance shares one budget and one cache.
pub struct GatewayClient {
    transport: Arc<dyn HttpTransport>,
    config: GatewayConfig,
    rate_limiter: RateLimiter,
    model_cache: ResultCache<Vec<ModelDescriptor>>,
    normalizer: ResponseNormalizer,
}

impl GatewayClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        config: GatewayConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limit_per_minute(), Arc::clone(&clock));
        Self {
            transport,
            config,
            rate_limiter,
            model_cache: ResultCache::new(clock),
            normalizer: ResponseNormalizer::new(),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Sends a single-turn prompt, using the configured default model when
    /// `model` is absent.
    pub async fn send_prompt(
        &self,
        text: &str,
        model: Option<&str>,
    ) -> Result<NormalizedResponse, GatewayError> {
        if text.trim().is_empty() {
            return Err(GatewayError::invalid_input("prompt must not be empty"));
        }

        self.rate_limiter.check_and_consume().await?;

        let model = model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.config.default_model());
        let url = self.config.chat_completions_url();
        info!("Sending prompt to {} using model {}", url, model);

        let payload = json!({
            "model": model,
            "messages": [{"role": "user", "content": text}],
        });
        let request =
            HttpRequest::post(url, payload, PROMPT_TIMEOUT).with_api_auth(self.config.api_key());

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| send_failure(&e.to_string()))?;

        if !response.is_success() {
            let status = response.status;
            return Err(GatewayError::from_status(status).unwrap_or_else(|| {
                send_failure(&format!("Request failed with status code {status}"))
            }));
        }

        let body = response.parsed_body();
        if is_html_masquerade(&body) {
            warn!("Received HTML response instead of JSON from {}", self.config.base_url());
            return Err(GatewayError::UnexpectedHtmlResponse);
        }

        debug!("Chat completion succeeded with HTTP {}", response.status);
        Ok(self.normalizer.normalize(&body))
    }

    /// Lists the models the gateway offers. Served from cache for five
    /// minutes after a successful fetch; cache hits cost no rate budget.
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, GatewayError> {
        if let Some(models) = self.model_cache.get(MODELS_CACHE_KEY).await {
            debug!("Serving {} models from cache", models.len());
            return Ok(models);
        }

        self.rate_limiter.check_and_consume().await?;

        let url = self.config.models_url();
        info!("Fetching models from {}", url);
        let body = self.fetch_listing(url).await?;

        let models = ModelDescriptor::list_from_json(&body);
        info!("Found {} models", models.len());

        self.model_cache
            .set(MODELS_CACHE_KEY, models.clone(), MODEL_CACHE_TTL)
            .await;
        Ok(models)
    }

    /// Lists models through the gateway's Ollama passthrough. Not cached.
    pub async fn list_ollama_models(&self) -> Result<Vec<ModelDescriptor>, GatewayError> {
        self.rate_limiter.check_and_consume().await?;

        let url = self.config.ollama_tags_url();
        info!("Fetching Ollama models from {}", url);
        let body = self.fetch_listing(url).await?;

        let models = ModelDescriptor::list_from_ollama_tags(&body);
        info!("Found {} Ollama models", models.len());
        Ok(models)
    }

    /// Probes the health endpoint. Never fails: every outcome, including no
    /// response at all, is described by the returned status.
    pub async fn get_system_status(&self) -> SystemStatus {
        let request = HttpRequest::get(self.config.health_url(), HEALTH_TIMEOUT);

        match self.transport.execute(request).await {
            Ok(response) => {
                debug!("Health endpoint returned HTTP {}", response.status);
                SystemStatus::from_response(response.status, server_header(&response))
            }
            Err(e) => {
                warn!("Health endpoint unreachable: {}", e);
                SystemStatus::offline(e.to_string())
            }
        }
    }

    async fn fetch_listing(&self, url: String) -> Result<Value, GatewayError> {
        let request =
            HttpRequest::get(url, LISTING_TIMEOUT).with_api_auth(self.config.api_key());

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| listing_failure(&e.to_string()))?;

        if !response.is_success() {
            warn!("Model listing returned HTTP {}", response.status);
            return Err(listing_failure(&format!(
                "Request failed with status code {}",
                response.status
            )));
        }

        Ok(response.parsed_body())
    }
}

fn send_failure(detail: &str) -> GatewayError {
    warn!("Error sending message: {}", detail);
    GatewayError::transport(format!("Failed to send message: {detail}"))
}

fn listing_failure(detail: &str) -> GatewayError {
    GatewayError::transport(format!("Failed to fetch models: {detail}"))
}

fn server_header(response: &HttpResponse) -> Option<String> {
    response
        .header("server")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
