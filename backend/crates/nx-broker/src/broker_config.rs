use crate::{BrokerError, OverflowPolicy, Result};

/// Values buffered per subscriber before the overflow policy applies
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;
/// Live subscriptions allowed across all keys
pub const DEFAULT_MAX_SUBSCRIBERS: usize = 10_000;

/// Configuration for a [`crate::KeyedBroker`]
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Queue capacity per subscriber (bounded to prevent memory exhaustion)
    pub queue_capacity: usize,
    /// Applied when a subscriber's queue is full
    pub overflow_policy: OverflowPolicy,
    /// Broker-wide ceiling on live subscriptions
    pub max_subscribers: usize,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow_policy: OverflowPolicy::default(),
            max_subscribers: DEFAULT_MAX_SUBSCRIBERS,
        }
    }
}

impl BrokerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(BrokerError::invalid_config(
                "queue_capacity must be at least 1",
            ));
        }

        if self.max_subscribers == 0 {
            return Err(BrokerError::invalid_config(
                "max_subscribers must be at least 1",
            ));
        }

        Ok(())
    }
}
