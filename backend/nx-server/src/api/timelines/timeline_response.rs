use crate::StatusDto;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub statuses: Vec<StatusDto>,
}
