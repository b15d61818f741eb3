use crate::{
    BrokerConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, LoggingConfig, ServerConfig, TimelineConfig, WebSocketConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub broker: BrokerConfig,
    pub websocket: WebSocketConfig,
    pub timeline: TimelineConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for NX_CONFIG_DIR env var, else use ./.nx/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply NX_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: NX_CONFIG_DIR env var > ./.nx/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.broker.validate()?;
        self.websocket.validate()?;
        self.timeline.validate()?;

        if let Some(file) = &self.logging.file
            && (file.contains("..") || Path::new(file).is_absolute())
        {
            return Err(ConfigError::logging(
                "logging.file must be a relative file name and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (domain {})",
            self.server.host, self.server.port, self.server.domain
        );

        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );

        info!(
            "  broker: queue={}, overflow={}, max_subscribers={}",
            self.broker.queue_capacity, self.broker.overflow_policy, self.broker.max_subscribers
        );

        info!(
            "  websocket: buffer={}, heartbeat={}s",
            self.websocket.send_buffer_size, self.websocket.heartbeat_interval_secs
        );

        info!(
            "  timeline: default={}, max={}",
            self.timeline.default_limit, self.timeline.max_limit
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("NX_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("NX_SERVER_PORT", &mut self.server.port);
        Self::apply_env_string("NX_SERVER_DOMAIN", &mut self.server.domain);

        // Logging
        Self::apply_env_parse("NX_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("NX_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("NX_LOG_FILE", &mut self.logging.file);

        // Broker
        Self::apply_env_parse(
            "NX_BROKER_QUEUE_CAPACITY",
            &mut self.broker.queue_capacity,
        );
        Self::apply_env_string(
            "NX_BROKER_OVERFLOW_POLICY",
            &mut self.broker.overflow_policy,
        );
        Self::apply_env_parse(
            "NX_BROKER_MAX_SUBSCRIBERS",
            &mut self.broker.max_subscribers,
        );

        // WebSocket
        Self::apply_env_parse(
            "NX_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );
        Self::apply_env_parse(
            "NX_WS_HEARTBEAT_INTERVAL_SECS",
            &mut self.websocket.heartbeat_interval_secs,
        );

        // Timeline
        Self::apply_env_parse(
            "NX_TIMELINE_DEFAULT_LIMIT",
            &mut self.timeline.default_limit,
        );
        Self::apply_env_parse("NX_TIMELINE_MAX_LIMIT", &mut self.timeline.max_limit);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
