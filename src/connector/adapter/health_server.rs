use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub const DEFAULT_HEALTH_PORT: u16 = 3001;

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    uptime: f64,
}

#[derive(Clone)]
struct HealthState {
    started_at: Arc<Instant>,
}

/// Liveness endpoint for container health checks.
pub fn health_router(started_at: Instant) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(HealthState {
            started_at: Arc::new(started_at),
        })
}

async fn root() -> &'static str {
    "Open WebUI relay is running!"
}

async fn health(State(state): State<HealthState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "healthy",
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

/// Binds `0.0.0.0:port`, falling back to an OS-assigned port when the
/// requested one is taken.
pub async fn bind_health_listener(port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            warn!("Port {} is already in use. Trying an alternative port...", port);
            TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], 0)))
                .await
                .context("failed to bind fallback health port")
        }
        Err(e) => Err(e).with_context(|| format!("failed to bind {addr}")),
    }
}

pub async fn serve_health(listener: TcpListener, started_at: Instant) -> Result<()> {
    let local = listener.local_addr()?;
    info!("Health check server running on port {}", local.port());
    axum::serve(listener, health_router(started_at))
        .await
        .context("health server shutdown")
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve_health(listener, Instant::now()));
        addr
    }

    #[tokio::test]
    async fn test_health_reports_uptime() {
        let addr = spawn().await;

        let body: serde_json::Value = reqwest::get(format!("http://{addr}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "healthy");
        assert!(body["uptime"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn test_root_banner() {
        let addr = spawn().await;

        let text = reqwest::get(format!("http://{addr}/"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert_eq!(text, "Open WebUI relay is running!");
    }

    #[tokio::test]
    async fn test_port_in_use_falls_back() {
        let taken = TcpListener::bind("0.0.0.0:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let listener = bind_health_listener(port).await.unwrap();

        assert_ne!(listener.local_addr().unwrap().port(), port);
    }
}
