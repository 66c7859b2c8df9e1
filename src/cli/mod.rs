use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a question to your Open WebUI instance
    Ask {
        /// The question or prompt you want to ask
        question: String,

        /// The specific model ID to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List available models from your Open WebUI instance
    Models,

    /// Get the status of your Open WebUI instance
    Status,

    /// Check that the relay is responding
    Ping,

    /// Read slash commands (/ask, /models, /status, /ping) from stdin
    Shell {
        /// Also serve the liveness endpoint on this port (e.g., --health-port 3001)
        #[arg(long)]
        health_port: Option<u16>,
    },

    /// Serve only the liveness endpoint (GET / and GET /health)
    Health {
        /// Port to listen on; defaults to $PORT, then 3001
        #[arg(long)]
        port: Option<u16>,
    },
}
