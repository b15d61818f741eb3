use crate::subscriber_queue::{Offer, SubscriberQueue};
use crate::{OverflowPolicy, SubscriptionId};

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Outcome of fanning one value out to a channel's subscribers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Subscriber queues that now hold the value
    pub delivered: usize,
    /// Values discarded by the overflow policy (evicted or rejected)
    pub dropped: usize,
    /// Subscribers closed and detached because their queue overflowed
    pub disconnected: usize,
}

/// A single topic: the set of subscriber queues for one key
pub struct BroadcastChannel<T> {
    subscribers: Mutex<HashMap<SubscriptionId, Arc<SubscriberQueue<T>>>>,
    queue_capacity: usize,
    overflow_policy: OverflowPolicy,
}

impl<T: Clone> BroadcastChannel<T> {
    pub fn new(queue_capacity: usize, overflow_policy: OverflowPolicy) -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            queue_capacity,
            overflow_policy,
        }
    }

    pub(crate) fn attach(&self, id: SubscriptionId) -> Arc<SubscriberQueue<T>> {
        let queue = Arc::new(SubscriberQueue::new(
            self.queue_capacity,
            self.overflow_policy,
        ));
        self.subscribers.lock().insert(id, Arc::clone(&queue));
        queue
    }

    /// Remove a subscriber; true if it was still attached
    pub(crate) fn detach(&self, id: SubscriptionId) -> bool {
        self.subscribers.lock().remove(&id).is_some()
    }

    /// Hand `value` to every attached subscriber.
    ///
    /// The subscriber set stays locked for the whole fan-out, so concurrent
    /// publishes reach every subscriber of this channel in the same order.
    pub fn publish(&self, value: T) -> Delivery {
        let mut subscribers = self.subscribers.lock();
        let mut delivery = Delivery::default();
        let mut overflowed = Vec::new();

        for (id, queue) in subscribers.iter() {
            match queue.offer(value.clone()) {
                Offer::Accepted => delivery.delivered += 1,
                Offer::Displaced => {
                    delivery.delivered += 1;
                    delivery.dropped += 1;
                }
                Offer::Rejected => delivery.dropped += 1,
                Offer::Overflowed => {
                    delivery.dropped += 1;
                    overflowed.push(*id);
                }
                Offer::Closed => {}
            }
        }

        for id in overflowed {
            subscribers.remove(&id);
            delivery.disconnected += 1;
        }

        delivery
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.lock().is_empty()
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow_policy
    }
}
