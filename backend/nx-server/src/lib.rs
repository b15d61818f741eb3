pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod store;
pub mod streaming;

#[cfg(test)]
mod tests;

pub use api::{
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::account_id::{ACCOUNT_ID_HEADER, CurrentAccount, MaybeAccount},
    statuses::{
        accounts_response::AccountsResponse,
        create_status_request::CreateStatusRequest,
        interaction_response::InteractionResponse,
        interactions::{
            bookmark_status, favourite_status, favourited_by, unbookmark_status,
            unfavourite_status,
        },
        status_dto::StatusDto,
        status_response::StatusResponse,
        statuses::{MAX_STATUS_CHARS, create_status, delete_status, get_status},
    },
    timelines::{
        timeline_query::TimelineQuery,
        timeline_response::TimelineResponse,
        timelines::{home_timeline, public_timeline},
    },
};
pub use app_state::AppState;
pub use metrics::ServerMetrics;
pub use models::{
    account_id::AccountId,
    status::{NewStatus, Status},
    status_id::StatusId,
    status_interactions::StatusInteractions,
    visibility::Visibility,
};
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use store::status_store::StatusStore;
pub use streaming::{
    handler::stream_user,
    status_event::StatusEvent,
    stream_config::StreamConfig,
    stream_connection::{CloseReason, StreamConnection},
    stream_frame::StreamFrame,
};

pub use crate::routes::build_router;
