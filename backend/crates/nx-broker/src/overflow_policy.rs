use crate::BrokerError;

use std::fmt;
use std::str::FromStr;

/// What a subscriber queue does with a value that arrives while it is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Evict the oldest buffered value to admit the new one
    #[default]
    DropOldest,
    /// Discard the incoming value and keep the buffer as is
    DropNewest,
    /// Close the subscriber; it drains what is buffered and then ends
    Disconnect,
}

impl OverflowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DropOldest => "drop_oldest",
            Self::DropNewest => "drop_newest",
            Self::Disconnect => "disconnect",
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverflowPolicy {
    type Err = BrokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "drop_oldest" => Ok(Self::DropOldest),
            "drop_newest" => Ok(Self::DropNewest),
            "disconnect" => Ok(Self::Disconnect),
            other => Err(BrokerError::invalid_config(format!(
                "unknown overflow policy '{}' (expected drop_oldest, drop_newest or disconnect)",
                other
            ))),
        }
    }
}
