mod broker_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod server_config;
mod timeline_config;
mod websocket_config;

#[cfg(test)]
mod tests;

pub use broker_config::{
    BrokerConfig, DEFAULT_MAX_SUBSCRIBERS, DEFAULT_QUEUE_CAPACITY, MAX_MAX_SUBSCRIBERS,
    MAX_QUEUE_CAPACITY, MIN_MAX_SUBSCRIBERS, MIN_QUEUE_CAPACITY,
};
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use timeline_config::{DEFAULT_TIMELINE_LIMIT, MAX_TIMELINE_LIMIT, TimelineConfig};
pub use websocket_config::WebSocketConfig;

const CONFIG_DIR_ENV: &str = "NX_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".nx";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DOMAIN: &str = "localhost";
const MIN_PORT: u16 = 1024;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
