use std::time::Instant;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::domain::{is_html_content, GatewayError, NormalizedResponse};

use super::super::Container;
use super::{describe_error, truncate_reply};

const EMPTY_REPLY: &str = "Received an empty response from the model. Please try again later.";

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, question: String, model: Option<String>, user: &str) -> Result<String> {
        let preview: String = question.chars().take(50).collect();
        info!("User {} asked: {}...", user, preview);

        let client = self.container.gateway_client();
        let start_time = Instant::now();
        let outcome = client.send_prompt(&question, model.as_deref()).await;
        let elapsed = start_time.elapsed().as_secs_f64();
        info!("Got response in {:.2}s", elapsed);

        let requested_model = model
            .as_deref()
            .unwrap_or_else(|| self.container.gateway_config().default_model());

        match outcome {
            Ok(response) => Ok(self.format_response(&response, requested_model, elapsed, user)),
            Err(e) => {
                error!("Error in ask command: {}", e);
                Ok(self.format_error(&e))
            }
        }
    }

    fn format_response(
        &self,
        response: &NormalizedResponse,
        requested_model: &str,
        elapsed_secs: f64,
        user: &str,
    ) -> String {
        if response.is_blank() {
            return EMPTY_REPLY.to_string();
        }
        if is_html_content(response.content()) {
            warn!("Answer content is an HTML page, not a model reply");
            return self.format_error(&GatewayError::UnexpectedHtmlResponse);
        }

        let model = if response.has_known_model() {
            response.model()
        } else {
            requested_model
        };
        let (content, overflow) = truncate_reply(response.content());

        let mut output = format!("AI Response\n===========\n{}\n\n", content);
        output.push_str(&format!("Response Time: {:.2}s\n", elapsed_secs));
        output.push_str(&format!("Model: {}\n", model));
        if overflow > 0 {
            output.push_str(&format!(
                "Note: The full response was truncated. It exceeded the 4000 character limit by {} characters.\n",
                overflow
            ));
        }
        output.push_str(&format!("Prompted by {}", user));
        output
    }

    fn format_error(&self, error: &GatewayError) -> String {
        if error.is_html_response() {
            return format!("Error: HTML Response Received\n\n{}", describe_error(error));
        }
        format!("Error: Failed to get a response - {}", describe_error(error))
    }
}
