pub mod accounts_response;
pub mod create_status_request;
pub mod interaction_response;
pub mod interactions;
pub mod status_dto;
pub mod status_response;
pub mod statuses;
