use crate::OverflowPolicy;

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::Notify;

/// Result of offering one value to a subscriber queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Offer {
    Accepted,
    /// Accepted after evicting the oldest buffered value
    Displaced,
    /// Discarded because the queue was full
    Rejected,
    /// Queue was full and is now closed
    Overflowed,
    Closed,
}

struct QueueState<T> {
    buffer: VecDeque<T>,
    closed: bool,
    dropped_total: u64,
    dropped_unreported: u64,
}

impl<T> QueueState<T> {
    fn record_drop(&mut self) {
        self.dropped_total += 1;
        self.dropped_unreported += 1;
    }
}

/// Bounded queue owned by exactly one subscriber.
///
/// The publishing side only ever calls [`SubscriberQueue::offer`], which never
/// waits: a full queue resolves through the overflow policy. The reading side
/// suspends in [`SubscriberQueue::pop`] until a value arrives or the queue is
/// closed.
pub(crate) struct SubscriberQueue<T> {
    state: Mutex<QueueState<T>>,
    ready: Notify,
    capacity: usize,
    policy: OverflowPolicy,
}

impl<T> SubscriberQueue<T> {
    pub(crate) fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        Self {
            state: Mutex::new(QueueState {
                buffer: VecDeque::new(),
                closed: false,
                dropped_total: 0,
                dropped_unreported: 0,
            }),
            ready: Notify::new(),
            capacity: capacity.max(1),
            policy,
        }
    }

    pub(crate) fn offer(&self, value: T) -> Offer {
        let outcome = {
            let mut state = self.state.lock();

            if state.closed {
                Offer::Closed
            } else if state.buffer.len() < self.capacity {
                state.buffer.push_back(value);
                Offer::Accepted
            } else {
                state.record_drop();
                match self.policy {
                    OverflowPolicy::DropOldest => {
                        state.buffer.pop_front();
                        state.buffer.push_back(value);
                        Offer::Displaced
                    }
                    OverflowPolicy::DropNewest => Offer::Rejected,
                    OverflowPolicy::Disconnect => {
                        state.closed = true;
                        Offer::Overflowed
                    }
                }
            }
        };

        if matches!(
            outcome,
            Offer::Accepted | Offer::Displaced | Offer::Overflowed
        ) {
            self.ready.notify_one();
        }

        outcome
    }

    /// Wait for the next value; `None` once the queue is closed and drained.
    ///
    /// Cancel safe: values stay buffered until a completed call takes them.
    pub(crate) async fn pop(&self) -> Option<T> {
        loop {
            {
                let mut state = self.state.lock();
                if let Some(value) = state.buffer.pop_front() {
                    return Some(value);
                }
                if state.closed {
                    return None;
                }
            }

            self.ready.notified().await;
        }
    }

    pub(crate) fn try_pop(&self) -> Option<T> {
        self.state.lock().buffer.pop_front()
    }

    /// Close the queue and discard anything still buffered
    pub(crate) fn release(&self) {
        {
            let mut state = self.state.lock();
            state.closed = true;
            state.buffer.clear();
        }
        self.ready.notify_one();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub(crate) fn len(&self) -> usize {
        self.state.lock().buffer.len()
    }

    pub(crate) fn dropped_total(&self) -> u64 {
        self.state.lock().dropped_total
    }

    /// Drops recorded since the previous call
    pub(crate) fn take_unreported_drops(&self) -> u64 {
        std::mem::take(&mut self.state.lock().dropped_unreported)
    }
}
