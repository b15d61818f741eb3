use crate::Delivery;

use metrics::{counter, gauge};

/// Metrics collector for broker operations
#[derive(Debug, Clone)]
pub struct BrokerMetrics {
    prefix: &'static str,
}

impl BrokerMetrics {
    pub fn new() -> Self {
        Self { prefix: "nx_broker" }
    }

    /// Record a channel created for a previously idle key
    pub fn channel_created(&self) {
        counter!(format!("{}.channels.created", self.prefix)).increment(1);
        gauge!(format!("{}.channels.active", self.prefix)).increment(1.0);
    }

    /// Record a channel reclaimed after its last subscriber left
    pub fn channel_removed(&self) {
        counter!(format!("{}.channels.removed", self.prefix)).increment(1);
        gauge!(format!("{}.channels.active", self.prefix)).decrement(1.0);
    }

    pub fn subscription_opened(&self) {
        counter!(format!("{}.subscriptions.opened", self.prefix)).increment(1);
        gauge!(format!("{}.subscriptions.active", self.prefix)).increment(1.0);
    }

    pub fn subscription_closed(&self, count: usize) {
        counter!(format!("{}.subscriptions.closed", self.prefix)).increment(count as u64);
        gauge!(format!("{}.subscriptions.active", self.prefix)).decrement(count as f64);
    }

    /// Record a subscribe refused by the subscriber ceiling
    pub fn subscription_rejected(&self) {
        counter!(format!("{}.subscriptions.rejected", self.prefix)).increment(1);
    }

    /// Record one publish and what the fan-out did with it
    pub fn published(&self, delivery: &Delivery) {
        counter!(format!("{}.published", self.prefix)).increment(1);
        counter!(format!("{}.delivered", self.prefix)).increment(delivery.delivered as u64);

        if delivery.dropped > 0 {
            counter!(format!("{}.dropped", self.prefix)).increment(delivery.dropped as u64);
        }

        if delivery.disconnected > 0 {
            counter!(format!("{}.overflow_disconnects", self.prefix))
                .increment(delivery.disconnected as u64);
        }
    }

    /// Record a publish to a key nobody is subscribed to
    pub fn published_without_subscribers(&self) {
        counter!(format!("{}.published.unobserved", self.prefix)).increment(1);
    }
}

impl Default for BrokerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
