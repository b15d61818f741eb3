use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DOMAIN, DEFAULT_HOST, DEFAULT_PORT, MIN_PORT,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public domain used when building status URIs
    pub domain: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            domain: String::from(DEFAULT_DOMAIN),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 means "auto-assign" - OS picks an available port.
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::server(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if self.domain.trim().is_empty() || self.domain.contains('/') {
            return Err(ConfigError::server(format!(
                "server.domain must be a bare host name, got '{}'",
                self.domain
            )));
        }

        Ok(())
    }
}
