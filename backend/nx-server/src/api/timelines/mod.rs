pub mod timeline_query;
pub mod timeline_response;
pub mod timelines;
