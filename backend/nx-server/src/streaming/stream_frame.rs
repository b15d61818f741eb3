use crate::{StatusDto, StatusEvent};

use axum::extract::ws::Message;
use serde::Serialize;

/// JSON text frame sent to streaming clients
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum StreamFrame<'a> {
    Update { payload: &'a StatusDto },
    /// Payload is the deleted status id
    Delete { payload: String },
    /// Events this client lost to the overflow policy since the last notice
    Lagged { dropped: u64 },
}

impl<'a> StreamFrame<'a> {
    pub fn name(&self) -> &'static str {
        match self {
            StreamFrame::Update { .. } => "update",
            StreamFrame::Delete { .. } => "delete",
            StreamFrame::Lagged { .. } => "lagged",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_message(&self) -> serde_json::Result<Message> {
        Ok(Message::Text(self.to_json()?.into()))
    }
}

impl<'a> From<&'a StatusEvent> for StreamFrame<'a> {
    fn from(event: &'a StatusEvent) -> Self {
        match event {
            StatusEvent::Update(status) => StreamFrame::Update {
                payload: status.as_ref(),
            },
            StatusEvent::Delete(id) => StreamFrame::Delete {
                payload: id.to_string(),
            },
        }
    }
}
