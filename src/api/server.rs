//! HTTP server lifecycle.
//!
//! Wraps `axum::serve` with a oneshot-triggered graceful shutdown so
//! the binary (and tests) can stop the listener deterministically.
//! Pattern: bind, spawn background task, return a handle holding the
//! shutdown channel.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Handle to a running API server. Dropping it leaves the server
/// running; call [`ApiServer::shutdown`] to stop it.
pub struct ApiServer {
    /// Address the listener actually bound, useful with port 0.
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ApiServer {
    /// Binds `addr` and serves `app` until [`ApiServer::shutdown`].
    pub async fn start(addr: SocketAddr, app: Router) -> Result<ApiServer, String> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| format!("Failed to bind API server on {addr}: {e}"))?;

        let addr = listener
            .local_addr()
            .map_err(|e| format!("Failed to read server address: {e}"))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let shutdown_signal = async move {
                let _ = shutdown_rx.await;
                tracing::info!("API server received shutdown signal");
            };

            tracing::info!(%addr, "API server started");

            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal)
                .await
            {
                tracing::error!("API server error: {e}");
            }

            tracing::info!("API server stopped");
        });

        Ok(ApiServer {
            addr,
            shutdown_tx: Some(shutdown_tx),
            task,
        })
    }

    /// Shut down the server gracefully. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }

    /// Waits for the serve task to finish after a shutdown request.
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}
