use crate::{Status, StatusDto, StatusInteractions};

use serde::{Deserialize, Serialize};

/// A status together with the caller's favourite and bookmark state
#[derive(Debug, Serialize, Deserialize)]
pub struct InteractionResponse {
    pub status: StatusDto,
    pub favourites_count: usize,
    pub favourited: bool,
    pub bookmarked: bool,
}

impl From<(Status, StatusInteractions)> for InteractionResponse {
    fn from((status, interactions): (Status, StatusInteractions)) -> Self {
        Self {
            status: status.into(),
            favourites_count: interactions.favourites_count,
            favourited: interactions.favourited,
            bookmarked: interactions.bookmarked,
        }
    }
}
