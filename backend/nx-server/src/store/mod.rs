pub mod error;
pub mod status_store;
