pub mod error;
pub mod handler;
pub mod status_event;
pub mod stream_config;
pub mod stream_connection;
pub mod stream_frame;
