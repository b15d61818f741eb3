use crate::keyed_broker::BrokerInner;
use crate::subscriber_queue::SubscriberQueue;
use crate::{BroadcastChannel, SubscriptionId};

use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Weak};

use futures::Stream;

/// One consumer's attachment to a key's broadcast channel.
///
/// Values are read with [`Subscription::recv`]. Dropping the subscription
/// disconnects it, so a consumer task that is cancelled or aborted still
/// releases its queue and lets the broker reclaim an empty channel.
pub struct Subscription<K, T>
where
    K: Eq + Hash + Clone + Debug,
    T: Clone,
{
    id: SubscriptionId,
    key: K,
    channel: Arc<BroadcastChannel<T>>,
    queue: Arc<SubscriberQueue<T>>,
    broker: Weak<BrokerInner<K, T>>,
    disconnected: bool,
}

impl<K, T> Subscription<K, T>
where
    K: Eq + Hash + Clone + Debug,
    T: Clone,
{
    pub(crate) fn new(
        id: SubscriptionId,
        key: K,
        channel: Arc<BroadcastChannel<T>>,
        queue: Arc<SubscriberQueue<T>>,
        broker: Weak<BrokerInner<K, T>>,
    ) -> Self {
        Self {
            id,
            key,
            channel,
            queue,
            broker,
            disconnected: false,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// Wait for the next value.
    ///
    /// Returns `None` once the subscription has been disconnected, or when
    /// the overflow policy closed it and the remaining buffer is drained.
    /// There is no timeout; pair with [`Subscription::recv_until`] or
    /// `tokio::select!` to observe cancellation. Cancel safe.
    pub async fn recv(&mut self) -> Option<T> {
        if self.disconnected {
            return None;
        }

        self.queue.pop().await
    }

    /// Like [`Subscription::recv`], but gives up when `cancelled` completes.
    ///
    /// Cancellation disconnects the subscription and yields `None`.
    pub async fn recv_until<F>(&mut self, cancelled: F) -> Option<T>
    where
        F: Future<Output = ()>,
    {
        if self.disconnected {
            return None;
        }

        let received = {
            let queue = &self.queue;
            tokio::select! {
                biased;
                _ = cancelled => None,
                value = queue.pop() => Some(value),
            }
        };

        match received {
            Some(value) => value,
            None => {
                log::debug!(
                    "Subscription {} to key {:?} cancelled while waiting",
                    self.id,
                    self.key
                );
                self.disconnect();
                None
            }
        }
    }

    /// Take a buffered value without waiting
    pub fn try_recv(&mut self) -> Option<T> {
        if self.disconnected {
            return None;
        }

        self.queue.try_pop()
    }

    /// Consume the subscription as a stream that ends with the subscription
    pub fn into_stream(self) -> impl Stream<Item = T> {
        futures::stream::unfold(self, |mut subscription| async move {
            let value = subscription.recv().await?;
            Some((value, subscription))
        })
    }

    /// Release the queue and detach from the channel. Idempotent.
    pub fn disconnect(&mut self) {
        if self.disconnected {
            return;
        }
        self.disconnected = true;
        self.queue.release();

        match self.broker.upgrade() {
            Some(broker) => broker.unsubscribe(&self.key, self.id, &self.channel),
            None => {
                self.channel.detach(self.id);
            }
        }
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    /// True once no further values will arrive (disconnected or overflowed)
    pub fn is_closed(&self) -> bool {
        self.disconnected || self.queue.is_closed()
    }

    /// Values currently buffered
    pub fn buffered(&self) -> usize {
        self.queue.len()
    }

    /// Values this subscriber lost to the overflow policy so far
    pub fn dropped_count(&self) -> u64 {
        self.queue.dropped_total()
    }

    /// Whether this subscriber has ever fallen behind
    pub fn is_lagging(&self) -> bool {
        self.dropped_count() > 0
    }

    /// Values dropped since the previous call, for lag notices to the client
    pub fn take_lagged(&mut self) -> u64 {
        self.queue.take_unreported_drops()
    }
}

impl<K, T> Drop for Subscription<K, T>
where
    K: Eq + Hash + Clone + Debug,
    T: Clone,
{
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl<K, T> Debug for Subscription<K, T>
where
    K: Eq + Hash + Clone + Debug,
    T: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("disconnected", &self.disconnected)
            .finish()
    }
}
