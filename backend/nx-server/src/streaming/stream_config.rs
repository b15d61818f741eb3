use std::time::Duration;

use nx_config::WebSocketConfig;

#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Outgoing frames buffered between the stream loop and the socket writer
    pub send_buffer_size: usize,
    pub heartbeat_interval: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::from(&WebSocketConfig::default())
    }
}

impl From<&WebSocketConfig> for StreamConfig {
    fn from(config: &WebSocketConfig) -> Self {
        Self {
            send_buffer_size: config.send_buffer_size,
            heartbeat_interval: Duration::from_secs(config.heartbeat_interval_secs),
        }
    }
}
