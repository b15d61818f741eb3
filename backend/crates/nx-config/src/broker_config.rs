use crate::{ConfigError, ConfigErrorResult};

use nx_broker::OverflowPolicy;
use serde::Deserialize;

// Per-subscriber queue capacity constraints
pub const MIN_QUEUE_CAPACITY: usize = 1;
pub const MAX_QUEUE_CAPACITY: usize = 65_536;
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

// Live subscription ceiling constraints
pub const MIN_MAX_SUBSCRIBERS: usize = 1;
pub const MAX_MAX_SUBSCRIBERS: usize = 1_000_000;
pub const DEFAULT_MAX_SUBSCRIBERS: usize = 10_000;

/// Event broker settings: how much each live stream may buffer and what
/// happens when a client falls behind.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Events buffered per streaming subscriber
    pub queue_capacity: usize,
    /// One of `drop_oldest`, `drop_newest`, `disconnect`
    pub overflow_policy: String,
    /// Live subscriptions allowed across all accounts
    pub max_subscribers: usize,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow_policy: OverflowPolicy::default().to_string(),
            max_subscribers: DEFAULT_MAX_SUBSCRIBERS,
        }
    }
}

impl BrokerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.queue_capacity < MIN_QUEUE_CAPACITY || self.queue_capacity > MAX_QUEUE_CAPACITY {
            return Err(ConfigError::broker(format!(
                "broker.queue_capacity must be {}-{}, got {}",
                MIN_QUEUE_CAPACITY, MAX_QUEUE_CAPACITY, self.queue_capacity
            )));
        }

        if self.max_subscribers < MIN_MAX_SUBSCRIBERS || self.max_subscribers > MAX_MAX_SUBSCRIBERS
        {
            return Err(ConfigError::broker(format!(
                "broker.max_subscribers must be {}-{}, got {}",
                MIN_MAX_SUBSCRIBERS, MAX_MAX_SUBSCRIBERS, self.max_subscribers
            )));
        }

        // The broker owns the accepted spellings
        if let Err(e) = self.overflow_policy.parse::<OverflowPolicy>() {
            return Err(ConfigError::broker(format!("broker.overflow_policy: {}", e)));
        }

        Ok(())
    }
}
