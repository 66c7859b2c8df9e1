use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};

use super::command::RelayCommand;
use super::router::Router;

const PROMPT: &str = "> ";

/// Reads slash commands line by line and writes each reply, until `/quit`
/// or end of input.
pub async fn run_shell<R, W>(router: &Router<'_>, user: &str, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    writer.write_all(PROMPT.as_bytes()).await?;
    writer.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "/quit" || line == "/exit" {
            debug!("Shell closed by {}", user);
            break;
        }

        if !line.is_empty() {
            let reply = match RelayCommand::parse(line) {
                Ok(command) => match router.route(command, user).await {
                    Ok(reply) => reply,
                    Err(e) => {
                        error!("Error executing {}: {:#}", line, e);
                        "There was an error while executing this command!".to_string()
                    }
                },
                Err(usage) => usage,
            };
            writer.write_all(reply.as_bytes()).await?;
            writer.write_all(b"\n\n").await?;
        }

        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;
    }

    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::connector::api::Container;
    use crate::connector::{ManualClock, MockTransport};
    use crate::domain::GatewayConfig;

    #[tokio::test]
    async fn test_shell_dispatches_until_quit() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_json(
            "/api/chat/completions",
            200,
            json!({"choices": [{"message": {"content": "Hi!"}}], "model": "gpt-4o"}),
        );
        let container = Container::with_transport(
            GatewayConfig::new("http://webui.test", "sk"),
            mock.clone(),
            Arc::new(ManualClock::new(0)),
        );
        let router = Router::new(&container);

        let input: &[u8] = b"/ask Say hi\n\nnot a command\n/quit\n/ask never sent\n";
        let mut output = Vec::new();
        run_shell(&router, "alice", input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Hi!"));
        assert!(text.contains("Commands start with '/'"));
        assert_eq!(mock.call_count("/api/chat/completions"), 1);
    }
}
