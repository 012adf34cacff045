//! Runtime configuration, resolved once from the environment at startup.

use std::net::SocketAddr;
use std::time::Duration;

use crate::engine::EngineMode;

/// Application-level constants
pub const APP_NAME: &str = "Prognosa";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the service listens unless `PROGNOSA_BIND` overrides it.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev";
pub const DEFAULT_GATEWAY_MODEL: &str = "google/gemini-3-flash-preview";
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 60;

/// Baseline log filter applied when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "prognosa=info,axum=warn"
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PROGNOSA_MODE must be \"table\" or \"gateway\", got \"{0}\"")]
    InvalidMode(String),
    #[error("PROGNOSA_BIND is not a valid socket address: {0}")]
    InvalidBindAddr(String),
    #[error("PROGNOSA_GATEWAY_TIMEOUT_SECS is not a number of seconds: {0}")]
    InvalidTimeout(String),
    #[error("gateway mode requires PROGNOSA_GATEWAY_KEY to be set")]
    MissingApiKey,
}

/// Connection settings for the delegated-inference gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

/// Full service configuration. `gateway` is present exactly when `mode`
/// is [`EngineMode::Gateway`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: EngineMode,
    pub bind_addr: SocketAddr,
    pub gateway: Option<GatewayConfig>,
}

impl AppConfig {
    /// Reads configuration from the environment. A gateway deployment
    /// without a credential fails here, at startup, never on a request.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mode = match env_or("PROGNOSA_MODE", "table").to_lowercase().as_str() {
            "table" => EngineMode::Table,
            "gateway" => EngineMode::Gateway,
            other => return Err(ConfigError::InvalidMode(other.to_string())),
        };

        let bind_raw = env_or("PROGNOSA_BIND", DEFAULT_BIND_ADDR);
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw.clone()))?;

        let gateway = match mode {
            EngineMode::Table => None,
            EngineMode::Gateway => Some(Self::gateway_from_env()?),
        };

        Ok(AppConfig {
            mode,
            bind_addr,
            gateway,
        })
    }

    fn gateway_from_env() -> Result<GatewayConfig, ConfigError> {
        let api_key = std::env::var("PROGNOSA_GATEWAY_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let timeout_raw = env_or(
            "PROGNOSA_GATEWAY_TIMEOUT_SECS",
            &DEFAULT_GATEWAY_TIMEOUT_SECS.to_string(),
        );
        let timeout_secs: u64 = timeout_raw
            .parse()
            .map_err(|_| ConfigError::InvalidTimeout(timeout_raw.clone()))?;

        Ok(GatewayConfig {
            base_url: env_or("PROGNOSA_GATEWAY_URL", DEFAULT_GATEWAY_URL),
            api_key,
            model: env_or("PROGNOSA_GATEWAY_MODEL", DEFAULT_GATEWAY_MODEL),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_env() {
        for key in [
            "PROGNOSA_MODE",
            "PROGNOSA_BIND",
            "PROGNOSA_GATEWAY_URL",
            "PROGNOSA_GATEWAY_KEY",
            "PROGNOSA_GATEWAY_MODEL",
            "PROGNOSA_GATEWAY_TIMEOUT_SECS",
        ] {
            std::env::remove_var(key);
        }
    }

    // Environment variables are process-global, so the scenarios run
    // sequentially inside one test instead of racing across threads.
    #[test]
    fn from_env_resolves_modes_and_credentials() {
        clear_env();

        // Defaults: table mode, no gateway, default bind address.
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.mode, EngineMode::Table);
        assert!(cfg.gateway.is_none());
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());

        // Gateway mode without a key fails at startup.
        std::env::set_var("PROGNOSA_MODE", "gateway");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        // A blank key counts as missing.
        std::env::set_var("PROGNOSA_GATEWAY_KEY", "   ");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        // With a key, gateway settings fall back to their defaults.
        std::env::set_var("PROGNOSA_GATEWAY_KEY", "secret-key");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.mode, EngineMode::Gateway);
        let gateway = cfg.gateway.unwrap();
        assert_eq!(gateway.base_url, DEFAULT_GATEWAY_URL);
        assert_eq!(gateway.model, DEFAULT_GATEWAY_MODEL);
        assert_eq!(gateway.api_key, "secret-key");
        assert_eq!(gateway.timeout, Duration::from_secs(60));

        // Overrides are honoured.
        std::env::set_var("PROGNOSA_GATEWAY_URL", "http://localhost:9999/");
        std::env::set_var("PROGNOSA_GATEWAY_MODEL", "test/model");
        std::env::set_var("PROGNOSA_GATEWAY_TIMEOUT_SECS", "5");
        let gateway = AppConfig::from_env().unwrap().gateway.unwrap();
        assert_eq!(gateway.base_url, "http://localhost:9999/");
        assert_eq!(gateway.model, "test/model");
        assert_eq!(gateway.timeout, Duration::from_secs(5));

        // Bad timeout.
        std::env::set_var("PROGNOSA_GATEWAY_TIMEOUT_SECS", "soon");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidTimeout(_))
        ));
        std::env::remove_var("PROGNOSA_GATEWAY_TIMEOUT_SECS");

        // Unknown mode.
        std::env::set_var("PROGNOSA_MODE", "oracle");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidMode(_))
        ));

        // Bad bind address.
        std::env::set_var("PROGNOSA_MODE", "table");
        std::env::set_var("PROGNOSA_BIND", "not-an-address");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidBindAddr(_))
        ));

        clear_env();
    }

    #[test]
    fn version_constant_is_populated() {
        assert!(!APP_VERSION.is_empty());
        assert_eq!(APP_NAME, "Prognosa");
    }
}
