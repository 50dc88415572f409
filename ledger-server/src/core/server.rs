//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::api::build_app;
use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Serve until Ctrl-C, then drain in-flight requests
    ///
    /// Connections still open after `shutdown_timeout_ms` are dropped.
    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config)?,
        };

        let app = build_app(&state).with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Ledger server listening on {}", addr);

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        });
        let mut server = tokio::spawn(serve.into_future());

        tokio::select! {
            joined = &mut server => return flatten(joined),
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down...");
            }
        }

        let _ = shutdown_tx.send(true);
        let grace = Duration::from_millis(self.config.shutdown_timeout_ms);
        match tokio::time::timeout(grace, &mut server).await {
            Ok(joined) => flatten(joined)?,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.config.shutdown_timeout_ms,
                    "Graceful shutdown timed out, dropping open connections"
                );
                server.abort();
            }
        }

        tracing::info!("Ledger server stopped");
        Ok(())
    }
}

fn flatten(
    joined: std::result::Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<()> {
    match joined {
        Ok(served) => Ok(served?),
        Err(e) => Err(ServerError::Internal(anyhow::anyhow!("Server task failed: {e}"))),
    }
}
