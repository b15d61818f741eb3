pub mod delete_response;
pub mod error;
pub mod extractors;
pub mod statuses;
pub mod timelines;
