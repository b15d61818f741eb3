use crate::{AccountId, StatusId, Visibility};

use chrono::{DateTime, Utc};

/// A posted status as held by the store
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub id: StatusId,
    pub account_id: AccountId,
    pub uri: String,
    pub text: String,
    pub spoiler_text: String,
    pub sensitive: bool,
    pub language: String,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the author; the store assigns id, uri and timestamp
#[derive(Debug, Clone)]
pub struct NewStatus {
    pub account_id: AccountId,
    pub text: String,
    pub spoiler_text: String,
    pub sensitive: bool,
    pub language: String,
    pub visibility: Visibility,
}

impl Status {
    /// Canonical URI of a status on this instance
    pub fn uri_for(domain: &str, account_id: AccountId, id: StatusId) -> String {
        format!("https://{}/users/{}/statuses/{}", domain, account_id, id)
    }
}
