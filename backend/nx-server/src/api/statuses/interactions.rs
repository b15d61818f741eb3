//! Favourite and bookmark handlers

use crate::api::statuses::statuses::parse_status_id;
use crate::store::error::Result as StoreResult;
use crate::{
    AccountsResponse, ApiResult, AppState, CurrentAccount, InteractionResponse, Status,
    StatusInteractions,
};

use axum::{
    Json,
    extract::{Path, State},
};

/// POST /api/v1/statuses/{id}/favourite
pub async fn favourite_status(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Path(id): Path<String>,
) -> ApiResult<Json<InteractionResponse>> {
    let status_id = parse_status_id(&id)?;
    respond(&state, "favourite", state.store.favourite(status_id, account_id))
}

/// POST /api/v1/statuses/{id}/unfavourite
pub async fn unfavourite_status(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Path(id): Path<String>,
) -> ApiResult<Json<InteractionResponse>> {
    let status_id = parse_status_id(&id)?;
    respond(&state, "unfavourite", state.store.unfavourite(status_id, account_id))
}

/// POST /api/v1/statuses/{id}/bookmark
pub async fn bookmark_status(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Path(id): Path<String>,
) -> ApiResult<Json<InteractionResponse>> {
    let status_id = parse_status_id(&id)?;
    respond(&state, "bookmark", state.store.bookmark(status_id, account_id))
}

/// POST /api/v1/statuses/{id}/unbookmark
pub async fn unbookmark_status(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Path(id): Path<String>,
) -> ApiResult<Json<InteractionResponse>> {
    let status_id = parse_status_id(&id)?;
    respond(&state, "unbookmark", state.store.unbookmark(status_id, account_id))
}

/// GET /api/v1/statuses/{id}/favourited_by
///
/// Open to anonymous callers.
pub async fn favourited_by(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AccountsResponse>> {
    let status_id = parse_status_id(&id)?;

    let accounts = state.store.favourited_by(status_id)?;

    Ok(Json(AccountsResponse {
        accounts: accounts.iter().map(ToString::to_string).collect(),
    }))
}

fn respond(
    state: &AppState,
    action: &str,
    result: StoreResult<(Status, StatusInteractions)>,
) -> ApiResult<Json<InteractionResponse>> {
    let (status, interactions) = result?;

    state.metrics.status_interaction(action);
    log::debug!(
        "Status {} {} ({} favourites)",
        status.id,
        action,
        interactions.favourites_count
    );

    Ok(Json(InteractionResponse::from((status, interactions))))
}
