use crate::{
    BroadcastChannel, BrokerConfig, BrokerError, BrokerMetrics, Result as BrokerResult,
    Subscription, SubscriptionId,
};

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use dashmap::DashMap;

/// Manages broadcast channels for all keys.
///
/// Create one per process and hand clones to producers and consumers; clones
/// share the same registry.
pub struct KeyedBroker<K, T>
where
    K: Eq + Hash + Clone + Debug,
    T: Clone,
{
    inner: Arc<BrokerInner<K, T>>,
}

pub(crate) struct BrokerInner<K, T>
where
    K: Eq + Hash + Clone + Debug,
    T: Clone,
{
    channels: DashMap<K, Arc<BroadcastChannel<T>>>,
    config: BrokerConfig,
    next_id: AtomicU64,
    total_subscribers: AtomicUsize,
    metrics: BrokerMetrics,
}

impl<K, T> KeyedBroker<K, T>
where
    K: Eq + Hash + Clone + Debug,
    T: Clone,
{
    pub fn new(config: BrokerConfig) -> Self {
        log::info!(
            "Broker created (queue capacity {}, overflow policy {}, max {} subscribers)",
            config.queue_capacity,
            config.overflow_policy,
            config.max_subscribers
        );

        Self {
            inner: Arc::new(BrokerInner {
                channels: DashMap::new(),
                config,
                next_id: AtomicU64::new(1),
                total_subscribers: AtomicUsize::new(0),
                metrics: BrokerMetrics::new(),
            }),
        }
    }

    /// Subscribe to a key's channel, creating the channel if needed.
    ///
    /// The subscription sees values published from this point on; nothing
    /// published earlier is replayed. Fails only when the broker-wide
    /// subscriber ceiling is reached.
    pub fn subscribe(&self, key: K) -> BrokerResult<Subscription<K, T>> {
        self.inner.reserve_slot()?;

        let id = SubscriptionId::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed));

        // Attach while holding the entry so a concurrent teardown of this key
        // either completes first or sees the new subscriber.
        let (channel, queue, subscriber_count) = {
            let entry = self.inner.channels.entry(key.clone()).or_insert_with(|| {
                log::info!("Created broadcast channel for key {:?}", key);
                self.inner.metrics.channel_created();
                Arc::new(BroadcastChannel::new(
                    self.inner.config.queue_capacity,
                    self.inner.config.overflow_policy,
                ))
            });

            let channel = Arc::clone(entry.value());
            let queue = channel.attach(id);
            let subscriber_count = channel.subscriber_count();
            (channel, queue, subscriber_count)
        };

        self.inner.metrics.subscription_opened();

        log::debug!(
            "Subscription {} attached to key {:?} ({} total subscribers)",
            id,
            key,
            subscriber_count
        );

        Ok(Subscription::new(
            id,
            key,
            channel,
            queue,
            Arc::downgrade(&self.inner),
        ))
    }

    /// Publish a value to every subscriber currently attached to `key`.
    ///
    /// Returns the number of subscriber queues holding the value afterwards.
    /// A key without subscribers has no channel, so the value is discarded
    /// and 0 is returned. Never waits on a subscriber.
    pub fn publish<Q>(&self, key: &Q, value: T) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let channel = match self.inner.channels.get(key) {
            Some(entry) => Arc::clone(entry.value()),
            None => {
                log::debug!("No broadcast channel exists for key {:?}", key);
                self.inner.metrics.published_without_subscribers();
                return 0;
            }
        };

        let delivery = channel.publish(value);
        self.inner.metrics.published(&delivery);

        if delivery.dropped > 0 {
            log::debug!(
                "Publish to key {:?} dropped {} values for lagging subscribers",
                key,
                delivery.dropped
            );
        }

        if delivery.disconnected > 0 {
            log::warn!(
                "Disconnected {} subscribers of key {:?} after queue overflow",
                delivery.disconnected,
                key
            );
            self.inner.release_slots(delivery.disconnected);
            self.inner.reclaim_if_empty(key, &channel);
        }

        log::debug!(
            "Published to key {:?} ({} receivers)",
            key,
            delivery.delivered
        );

        delivery.delivered
    }

    /// Subscribers currently attached to `key`
    pub fn subscriber_count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner
            .channels
            .get(key)
            .map(|entry| entry.value().subscriber_count())
            .unwrap_or(0)
    }

    /// Whether a channel is registered for `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.channels.contains_key(key)
    }

    /// Keys that currently have a channel
    pub fn active_keys(&self) -> Vec<K> {
        self.inner
            .channels
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Number of registered channels
    pub fn channel_count(&self) -> usize {
        self.inner.channels.len()
    }

    /// Live subscriptions across all keys
    pub fn total_subscribers(&self) -> usize {
        self.inner.total_subscribers.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.inner.config
    }
}

impl<K, T> BrokerInner<K, T>
where
    K: Eq + Hash + Clone + Debug,
    T: Clone,
{
    fn reserve_slot(&self) -> BrokerResult<()> {
        let max = self.config.max_subscribers;

        self.total_subscribers
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current < max).then_some(current + 1)
            })
            .map(|_| ())
            .map_err(|current| {
                log::warn!(
                    "Subscribe refused: {} subscribers (max: {})",
                    current,
                    max
                );
                self.metrics.subscription_rejected();
                BrokerError::resource_exhausted(current, max)
            })
    }

    fn release_slots(&self, count: usize) {
        self.total_subscribers.fetch_sub(count, Ordering::AcqRel);
        self.metrics.subscription_closed(count);
    }

    /// Detach a subscription and drop its key's channel if it is now empty.
    ///
    /// Runs under the key's entry lock, the same lock `subscribe` attaches
    /// under, so a racing subscribe either joins before the emptiness check
    /// or creates a fresh channel after the removal.
    pub(crate) fn unsubscribe(
        &self,
        key: &K,
        id: SubscriptionId,
        channel: &Arc<BroadcastChannel<T>>,
    ) {
        let mut detached = None;

        let removed = self
            .channels
            .remove_if(key, |_, current| {
                detached = Some(channel.detach(id));
                Arc::ptr_eq(current, channel) && channel.is_empty()
            })
            .is_some();

        // Key missing from the registry: the channel was already reclaimed.
        let detached = detached.unwrap_or_else(|| channel.detach(id));

        if detached {
            self.release_slots(1);
            log::debug!(
                "Subscription {} detached from key {:?} ({} remaining subscribers)",
                id,
                key,
                channel.subscriber_count()
            );
        }

        if removed {
            self.metrics.channel_removed();
            log::info!("Removed empty broadcast channel for key {:?}", key);
        }
    }

    fn reclaim_if_empty<Q>(&self, key: &Q, channel: &Arc<BroadcastChannel<T>>)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let removed = self
            .channels
            .remove_if(key, |_, current| {
                Arc::ptr_eq(current, channel) && channel.is_empty()
            })
            .is_some();

        if removed {
            self.metrics.channel_removed();
            log::info!("Removed empty broadcast channel for key {:?}", key);
        }
    }
}

impl<K, T> Clone for KeyedBroker<K, T>
where
    K: Eq + Hash + Clone + Debug,
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, T> Default for KeyedBroker<K, T>
where
    K: Eq + Hash + Clone + Debug,
    T: Clone,
{
    fn default() -> Self {
        Self::new(BrokerConfig::default())
    }
}
