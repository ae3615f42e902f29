//! HTTP server for the ranking service.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use tokio::signal;
use tracing::{error, info};

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::{create_router, AppState};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind: SocketAddr,
    /// Pinned reference date; the local date when unset
    pub today: Option<NaiveDate>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            today: None,
        }
    }
}

impl ServerConfig {
    /// Clock matching this configuration.
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.today {
            Some(date) => Arc::new(FixedClock(date)),
            None => Arc::new(SystemClock),
        }
    }
}

/// The ranking HTTP server.
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a server from its configuration.
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::new(config.clock());
        Self { config, state }
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run(self) -> anyhow::Result<()> {
        let router = create_router(self.state);

        let listener = tokio::net::TcpListener::bind(self.config.bind)
            .await
            .with_context(|| format!("failed to bind {}", self.config.bind))?;

        info!("Server listening on http://{}", self.config.bind);
        info!("  POST /api/tasks/analyze/ - Rank pending tasks");
        info!("  POST /api/tasks/suggest/ - Recommend the next task");
        info!("  GET /health - Health check");
        if let Some(date) = self.config.today {
            info!("Reference date pinned to {}", date);
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        info!("Shutting down");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
