use crate::error::Result as ServerErrorResult;
use crate::{AccountId, ServerMetrics, ShutdownCoordinator, StatusEvent, StatusStore, StreamConfig};

use nx_broker::{KeyedBroker, OverflowPolicy};
use nx_config::{Config, TimelineConfig};

/// Shared application state for REST and streaming handlers
#[derive(Clone)]
pub struct AppState {
    pub broker: KeyedBroker<AccountId, StatusEvent>,
    pub store: StatusStore,
    pub metrics: ServerMetrics,
    pub shutdown: ShutdownCoordinator,
    pub stream_config: StreamConfig,
    pub timeline: TimelineConfig,
}

impl AppState {
    /// Build the state, rejecting sections that would fail once traffic arrives
    pub fn from_config(config: &Config, shutdown: ShutdownCoordinator) -> ServerErrorResult<Self> {
        let broker_config = broker_config(&config.broker)?;
        config.websocket.validate()?;
        config.timeline.validate()?;

        Ok(Self {
            broker: KeyedBroker::new(broker_config),
            store: StatusStore::new(config.server.domain.clone()),
            metrics: ServerMetrics::new(),
            shutdown,
            stream_config: StreamConfig::from(&config.websocket),
            timeline: config.timeline.clone(),
        })
    }
}

/// Translate the `[broker]` section into the broker's own configuration
pub fn broker_config(
    section: &nx_config::BrokerConfig,
) -> nx_broker::Result<nx_broker::BrokerConfig> {
    let config = nx_broker::BrokerConfig {
        queue_capacity: section.queue_capacity,
        overflow_policy: section.overflow_policy.parse::<OverflowPolicy>()?,
        max_subscribers: section.max_subscribers,
    };
    config.validate()?;

    Ok(config)
}
