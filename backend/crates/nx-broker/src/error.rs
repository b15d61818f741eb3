use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("Subscriber limit reached: {current} subscribers (max: {max}) {location}")]
    ResourceExhausted {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Invalid broker configuration: {message} {location}")]
    InvalidConfig {
        message: String,
        location: ErrorLocation,
    },
}

impl BrokerError {
    /// Create a resource exhaustion error at the caller's location
    #[track_caller]
    pub fn resource_exhausted(current: usize, max: usize) -> Self {
        Self::ResourceExhausted {
            current,
            max,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a configuration error at the caller's location
    #[track_caller]
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Machine-readable code for logs and API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ResourceExhausted { .. } => "RESOURCE_EXHAUSTED",
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }
}

pub type Result<T> = std::result::Result<T, BrokerError>;
