use metrics::{counter, gauge};

/// Metrics collector for the REST and streaming surfaces
#[derive(Debug, Clone)]
pub struct ServerMetrics {
    prefix: &'static str,
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self { prefix: "nx_server" }
    }

    pub fn stream_opened(&self) {
        counter!(format!("{}.streams.opened", self.prefix)).increment(1);
        gauge!(format!("{}.streams.active", self.prefix)).increment(1.0);
    }

    /// Record a stream ending; `reason` is one of the close reasons logged by the connection
    pub fn stream_closed(&self, reason: &str) {
        counter!(format!("{}.streams.closed", self.prefix)).increment(1);
        counter!(format!("{}.streams.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.streams.active", self.prefix)).decrement(1.0);
    }

    pub fn stream_rejected(&self) {
        counter!(format!("{}.streams.rejected", self.prefix)).increment(1);
    }

    pub fn event_sent(&self, event: &str) {
        counter!(format!("{}.streams.events_sent", self.prefix)).increment(1);
        counter!(format!("{}.streams.events_sent.{}", self.prefix, event)).increment(1);
    }

    /// Record values a slow stream lost before they reached the socket
    pub fn stream_lagged(&self, dropped: u64) {
        counter!(format!("{}.streams.lagged", self.prefix)).increment(1);
        counter!(format!("{}.streams.dropped", self.prefix)).increment(dropped);
    }

    pub fn status_created(&self, receivers: usize) {
        counter!(format!("{}.statuses.created", self.prefix)).increment(1);
        gauge!(format!("{}.statuses.last_fanout", self.prefix)).set(receivers as f64);
    }

    pub fn status_deleted(&self) {
        counter!(format!("{}.statuses.deleted", self.prefix)).increment(1);
    }

    /// Record a favourite or bookmark change; `action` names the endpoint
    pub fn status_interaction(&self, action: &str) {
        counter!(format!("{}.statuses.interactions", self.prefix)).increment(1);
        counter!(format!("{}.statuses.interactions.{}", self.prefix, action)).increment(1);
    }

    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
