use crate::{AccountId, StatusId};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Status {id} not found {location}")]
    NotFound {
        id: StatusId,
        location: ErrorLocation,
    },

    #[error("Account {account_id} does not own status {id} {location}")]
    Forbidden {
        id: StatusId,
        account_id: AccountId,
        location: ErrorLocation,
    },
}

impl StoreError {
    #[track_caller]
    pub fn not_found(id: StatusId) -> Self {
        Self::NotFound {
            id,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn forbidden(id: StatusId, account_id: AccountId) -> Self {
        Self::Forbidden {
            id,
            account_id,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
