use crate::{StatusDto, StatusId};

use std::sync::Arc;

/// Event published to an account's live streams.
///
/// Cloned once per subscriber, so payloads are shared behind `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    Update(Arc<StatusDto>),
    Delete(StatusId),
}
