pub mod account_id;
pub mod status;
pub mod status_id;
pub mod status_interactions;
pub mod visibility;
