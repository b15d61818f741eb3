mod keyed_broker;
mod subscription;

use crate::{BrokerConfig, KeyedBroker, OverflowPolicy};

/// Broker keyed by string with small integer events
pub(crate) fn broker_with(
    queue_capacity: usize,
    overflow_policy: OverflowPolicy,
) -> KeyedBroker<String, u32> {
    KeyedBroker::new(BrokerConfig {
        queue_capacity,
        overflow_policy,
        ..BrokerConfig::default()
    })
}

/// Take everything currently buffered without waiting
pub(crate) fn drain(subscription: &mut crate::Subscription<String, u32>) -> Vec<u32> {
    std::iter::from_fn(|| subscription.try_recv()).collect()
}
