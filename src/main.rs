//! Prognosa binary: load configuration, pick a prediction engine,
//! serve the HTTP API until Ctrl-C.

use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use prognosa::api::{api_router, ApiServer, AppState};
use prognosa::config::{self, AppConfig};
use prognosa::engine::{GatewayClient, GatewayPredictor, Predictor, TableMatcher};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            process::exit(1);
        }
    };

    let engine: Arc<dyn Predictor> = match cfg.gateway {
        Some(ref gateway) => {
            Arc::new(GatewayPredictor::new(GatewayClient::from_config(gateway)))
        }
        None => Arc::new(TableMatcher::new()),
    };

    tracing::info!(
        mode = engine.mode().as_str(),
        version = config::APP_VERSION,
        "{} starting",
        config::APP_NAME
    );

    let mut server = match ApiServer::start(cfg.bind_addr, api_router(AppState::new(engine))).await
    {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start API server: {e}");
            process::exit(1);
        }
    };

    tracing::info!(addr = %server.addr, "Listening for prediction requests");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }

    server.shutdown();
    server.wait().await;
}
