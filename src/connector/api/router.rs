use anyhow::Result;

use crate::application::cooldown_for;

use super::command::{RelayCommand, HELP_TEXT};
use super::container::Container;
use super::controller::{AskController, ModelsController, PingController, StatusController};

pub struct Router<'a> {
    container: &'a Container,
    ask_controller: AskController<'a>,
    models_controller: ModelsController<'a>,
    status_controller: StatusController<'a>,
    ping_controller: PingController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            container,
            ask_controller: AskController::new(container),
            models_controller: ModelsController::new(container),
            status_controller: StatusController::new(container),
            ping_controller: PingController::new(container),
        }
    }

    /// Runs `command` on behalf of `user`, honouring per-user cooldowns.
    pub async fn route(&self, command: RelayCommand, user: &str) -> Result<String> {
        let name = command.name();
        if let Err(remaining) = self
            .container
            .cooldowns()
            .check(name, user, cooldown_for(name))
            .await
        {
            return Ok(format!(
                "Please wait {:.1} more second(s) before reusing the `{}` command.",
                remaining.as_secs_f64(),
                name
            ));
        }

        match command {
            RelayCommand::Ask { question, model } => {
                self.ask_controller.ask(question, model, user).await
            }
            RelayCommand::Models => self.models_controller.models(user).await,
            RelayCommand::Status => self.status_controller.status().await,
            RelayCommand::Ping => self.ping_controller.ping().await,
            RelayCommand::Help => Ok(HELP_TEXT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::HttpResponse;
    use crate::connector::{ManualClock, MockTransport};
    use crate::domain::GatewayConfig;

    #[tokio::test]
    async fn test_cooldown_blocks_repeat_use() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("/api/health", HttpResponse::new(200, ""));
        let clock = Arc::new(ManualClock::new(0));
        let container = Container::with_transport(
            GatewayConfig::new("http://webui.test", "sk"),
            mock.clone(),
            clock.clone(),
        );
        let router = Router::new(&container);

        let first = router.route(RelayCommand::Status, "alice").await.unwrap();
        assert!(first.contains("Status: online"));

        clock.advance_millis(4_000);
        let second = router.route(RelayCommand::Status, "alice").await.unwrap();
        assert_eq!(
            second,
            "Please wait 6.0 more second(s) before reusing the `status` command."
        );
        assert_eq!(mock.call_count("/api/health"), 1);

        let other_user = router.route(RelayCommand::Status, "bob").await.unwrap();
        assert!(other_user.contains("Status: online"));
    }

    #[tokio::test]
    async fn test_help_and_ping() {
        let mock = Arc::new(MockTransport::new());
        let container = Container::with_transport(
            GatewayConfig::new("http://webui.test", "sk"),
            mock,
            Arc::new(ManualClock::new(0)),
        );
        let router = Router::new(&container);

        assert_eq!(router.route(RelayCommand::Help, "alice").await.unwrap(), HELP_TEXT);
        assert!(router
            .route(RelayCommand::Ping, "alice")
            .await
            .unwrap()
            .starts_with("Pong!"));
    }
}
