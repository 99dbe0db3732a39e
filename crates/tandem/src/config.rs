//! Environment-driven server configuration.

use std::env;

/// Addresses the server binary listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// WebSocket listener address.
    pub bind_addr: String,
    /// Liveness endpoint address; `None` disables it.
    pub health_addr: Option<String>,
}

impl ServerConfig {
    /// Reads configuration from the environment.
    ///
    /// `TANDEM_ADDR` sets the full listen address. Without it, `PORT`
    /// picks the port on all interfaces, defaulting to 3000.
    /// `TANDEM_HEALTH_ADDR` enables the liveness endpoint.
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("TANDEM_ADDR").ok(),
            env::var("PORT").ok(),
            env::var("TANDEM_HEALTH_ADDR").ok(),
        )
    }

    fn from_vars(
        addr: Option<String>,
        port: Option<String>,
        health: Option<String>,
    ) -> Self {
        let bind_addr = addr.unwrap_or_else(|| {
            let port = port.unwrap_or_else(|| "3000".to_string());
            format!("0.0.0.0:{port}")
        });
        Self {
            bind_addr,
            health_addr: health,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_vars(None, None, None)
    }
}
