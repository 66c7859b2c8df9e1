use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

use crate::domain::ModelDescriptor;

use super::super::Container;
use super::{describe_error, truncate_reply};

pub struct ModelsController<'a> {
    container: &'a Container,
}

impl<'a> ModelsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Lists models from the gateway, falling back to its Ollama passthrough
    /// when the standard listing fails.
    pub async fn models(&self, user: &str) -> Result<String> {
        info!("User {} requested model list", user);

        let client = self.container.gateway_client();
        let start_time = Instant::now();
        let mut errors = String::new();

        let models = match client.list_models().await {
            Ok(models) => models,
            Err(standard_error) => {
                warn!("Standard model fetch failed: {}", standard_error);
                errors.push_str(&format!(
                    "Standard API failed: {}\n",
                    describe_error(&standard_error)
                ));

                match client.list_ollama_models().await {
                    Ok(models) => models,
                    Err(ollama_error) => {
                        warn!("Ollama model fetch failed: {}", ollama_error);
                        errors.push_str(&format!(
                            "Ollama API failed: {}\n",
                            describe_error(&ollama_error)
                        ));
                        Vec::new()
                    }
                }
            }
        };

        let elapsed = start_time.elapsed().as_secs_f64();
        info!("Got response in {:.2}s", elapsed);

        if models.is_empty() {
            return Ok(format!(
                "No models found. The following errors occurred:\n{}",
                errors
            ));
        }

        Ok(self.format_model_list(&models, elapsed, user))
    }

    fn format_model_list(&self, models: &[ModelDescriptor], elapsed_secs: f64, user: &str) -> String {
        let list = models
            .iter()
            .map(|m| format!("- **{}** (ID: `{}`)", m.display_name(), m.id()))
            .collect::<Vec<_>>()
            .join("\n");
        let (list, overflow) = truncate_reply(&list);

        let mut output = format!("Available Models\n================\n{}\n\n", list);
        output.push_str(&format!("Response Time: {:.2}s\n", elapsed_secs));
        output.push_str(&format!("Total Models: {}\n", models.len()));
        if overflow > 0 {
            output.push_str(&format!(
                "Note: The full model list was truncated. It exceeded the 4000 character limit by {} characters.\n",
                overflow
            ));
        }
        output.push_str(&format!("Requested by {}", user));
        output
    }
}
