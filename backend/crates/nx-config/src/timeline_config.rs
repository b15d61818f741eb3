use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_TIMELINE_LIMIT: usize = 40;
pub const MAX_TIMELINE_LIMIT: usize = 200;

/// Page sizes for timeline reads
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Statuses returned when the request names no limit
    pub default_limit: usize,
    /// Upper bound applied to requested limits
    pub max_limit: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_TIMELINE_LIMIT,
            max_limit: MAX_TIMELINE_LIMIT,
        }
    }
}

impl TimelineConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_limit == 0 || self.max_limit > MAX_TIMELINE_LIMIT {
            return Err(ConfigError::config(format!(
                "timeline.max_limit must be 1-{}, got {}",
                MAX_TIMELINE_LIMIT, self.max_limit
            )));
        }

        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(ConfigError::config(format!(
                "timeline.default_limit must be 1-{} (max_limit), got {}",
                self.max_limit, self.default_limit
            )));
        }

        Ok(())
    }

    /// Resolve a requested page size against the configured bounds
    pub fn clamp(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit)
    }
}
