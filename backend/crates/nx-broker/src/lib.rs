//! Keyed, in-memory fan-out of live events.
//!
//! A [`KeyedBroker`] maps topic keys (for example an account id) to
//! [`BroadcastChannel`]s. Channels are created lazily by the first
//! [`KeyedBroker::subscribe`] for a key and reclaimed as soon as their last
//! [`Subscription`] disconnects. Publishing never waits on subscribers: every
//! subscriber owns a bounded queue and a full queue applies the configured
//! [`OverflowPolicy`] instead of applying backpressure to the publisher.

pub mod broadcast_channel;
pub mod broker_config;
pub mod error;
pub mod keyed_broker;
pub mod metrics;
pub mod overflow_policy;
pub mod subscription;
pub mod subscription_id;

mod subscriber_queue;

pub use broadcast_channel::{BroadcastChannel, Delivery};
pub use broker_config::{BrokerConfig, DEFAULT_MAX_SUBSCRIBERS, DEFAULT_QUEUE_CAPACITY};
pub use error::{BrokerError, Result};
pub use keyed_broker::KeyedBroker;
pub use metrics::BrokerMetrics;
pub use overflow_policy::OverflowPolicy;
pub use subscription::Subscription;
pub use subscription_id::SubscriptionId;

#[cfg(test)]
mod tests;
