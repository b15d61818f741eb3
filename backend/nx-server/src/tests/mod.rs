mod account_id;
mod api_error;

use crate::{AccountId, NewStatus, Visibility};

pub(crate) fn account(id: i64) -> AccountId {
    AccountId::new(id).unwrap()
}

pub(crate) fn new_status(account_id: i64, text: &str, visibility: Visibility) -> NewStatus {
    NewStatus {
        account_id: account(account_id),
        text: text.to_string(),
        spoiler_text: String::new(),
        sensitive: false,
        language: "en".to_string(),
        visibility,
    }
}
