use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use webui_relay::connector::api::run_shell;
use webui_relay::connector::{bind_health_listener, serve_health, DEFAULT_HEALTH_PORT};
use webui_relay::{Commands, Container, ContainerConfig, RelayCommand, Router};

#[derive(Parser)]
#[command(name = "webui-relay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the Open WebUI instance (overrides OPEN_WEBUI_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Default model ID (overrides OPEN_WEBUI_DEFAULT_MODEL)
    #[arg(long, global = true)]
    default_model: Option<String>,

    /// Outbound requests allowed per minute (overrides RATE_LIMIT)
    #[arg(long, global = true)]
    rate_limit: Option<u32>,

    /// Name the requests are attributed to
    #[arg(short, long, global = true, default_value = "local")]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        base_url: cli.url,
        default_model: cli.default_model,
        rate_limit: cli.rate_limit,
    });
    let router = Router::new(&container);

    let command = match cli.command {
        Commands::Ask { question, model } => RelayCommand::Ask { question, model },
        Commands::Models => RelayCommand::Models,
        Commands::Status => RelayCommand::Status,
        Commands::Ping => RelayCommand::Ping,
        Commands::Shell { health_port } => {
            if let Some(port) = health_port {
                let listener = bind_health_listener(port).await?;
                let started_at = container.started_at();
                tokio::spawn(async move {
                    if let Err(e) = serve_health(listener, started_at).await {
                        warn!("Health server stopped: {:#}", e);
                    }
                });
            }

            let stdin = BufReader::new(tokio::io::stdin());
            return run_shell(&router, &cli.user, stdin, tokio::io::stdout()).await;
        }
        Commands::Health { port } => {
            let port = port.or_else(env_port).unwrap_or(DEFAULT_HEALTH_PORT);
            let listener = bind_health_listener(port).await?;
            return serve_health(listener, container.started_at()).await;
        }
    };

    let output = router.route(command, &cli.user).await?;
    println!("{}", output);

    Ok(())
}

fn env_port() -> Option<u16> {
    std::env::var("PORT").ok().and_then(|p| p.trim().parse().ok())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn ask_accepts_optional_model() {
        let cli = Cli::try_parse_from(["webui-relay", "ask", "Say hi", "--model", "llama3"])
            .expect("ask should parse");
        match cli.command {
            Commands::Ask { question, model } => {
                assert_eq!(question, "Say hi");
                assert_eq!(model.as_deref(), Some("llama3"));
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn global_overrides_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["webui-relay", "status", "--url", "http://x", "--rate-limit", "3"])
            .expect("status should parse");
        assert_eq!(cli.url.as_deref(), Some("http://x"));
        assert_eq!(cli.rate_limit, Some(3));
        assert_eq!(cli.user, "local");
    }

    #[test]
    fn ask_requires_question() {
        assert!(Cli::try_parse_from(["webui-relay", "ask"]).is_err());
    }
}
