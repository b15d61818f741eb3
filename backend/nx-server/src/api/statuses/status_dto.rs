use crate::{Status, Visibility};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire form of a status, shared by REST responses and stream frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDto {
    pub id: String,
    pub uri: String,
    pub account_id: String,
    pub content: String,
    pub spoiler_text: String,
    pub sensitive: bool,
    pub language: String,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
}

impl From<&Status> for StatusDto {
    fn from(s: &Status) -> Self {
        Self {
            id: s.id.to_string(),
            uri: s.uri.clone(),
            account_id: s.account_id.to_string(),
            content: s.text.clone(),
            spoiler_text: s.spoiler_text.clone(),
            sensitive: s.sensitive,
            language: s.language.clone(),
            visibility: s.visibility,
            created_at: s.created_at,
        }
    }
}

impl From<Status> for StatusDto {
    fn from(s: Status) -> Self {
        Self::from(&s)
    }
}
