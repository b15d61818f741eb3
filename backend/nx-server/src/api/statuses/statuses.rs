//! Status REST API handlers

use crate::{
    ApiError, ApiResult, AppState, CreateStatusRequest, CurrentAccount, DeleteResponse,
    NewStatus, StatusDto, StatusEvent, StatusId, StatusResponse,
};

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

/// Longest status text accepted, in characters
pub const MAX_STATUS_CHARS: usize = 500;
/// Longest spoiler text accepted, in characters
pub const MAX_SPOILER_CHARS: usize = 500;
pub const DEFAULT_LANGUAGE: &str = "en";

/// POST /api/v1/statuses
pub async fn create_status(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Json(req): Json<CreateStatusRequest>,
) -> ApiResult<Json<StatusResponse>> {
    // 1. Validate
    let text = req.status.trim();
    if text.is_empty() {
        return Err(ApiError::validation("Status text cannot be empty", "status"));
    }
    if text.chars().count() > MAX_STATUS_CHARS {
        return Err(ApiError::validation(
            format!("Status text exceeds {} characters", MAX_STATUS_CHARS),
            "status",
        ));
    }

    let spoiler_text = req.spoiler_text.unwrap_or_default();
    if spoiler_text.chars().count() > MAX_SPOILER_CHARS {
        return Err(ApiError::validation(
            format!("Spoiler text exceeds {} characters", MAX_SPOILER_CHARS),
            "spoiler_text",
        ));
    }

    let language = match req.language {
        Some(language) => validate_language(&language)?,
        None => DEFAULT_LANGUAGE.to_string(),
    };

    // 2. Store
    let status = state.store.insert(NewStatus {
        account_id,
        text: text.to_string(),
        spoiler_text,
        sensitive: req.sensitive.unwrap_or(false),
        language,
        visibility: req.visibility.unwrap_or_default(),
    });
    let dto = StatusDto::from(&status);

    // 3. Fan out to the author's live streams
    let receivers = state
        .broker
        .publish(&account_id, StatusEvent::Update(Arc::new(dto.clone())));
    state.metrics.status_created(receivers);

    log::info!(
        "Created status {} for account {} ({} live receivers)",
        status.id,
        account_id,
        receivers
    );

    Ok(Json(StatusResponse { status: dto }))
}

/// GET /api/v1/statuses/{id}
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StatusResponse>> {
    let status_id = parse_status_id(&id)?;

    let status = state
        .store
        .get(status_id)
        .ok_or_else(|| ApiError::not_found(format!("Status {} not found", status_id)))?;

    Ok(Json(StatusResponse {
        status: status.into(),
    }))
}

/// DELETE /api/v1/statuses/{id}
pub async fn delete_status(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let status_id = parse_status_id(&id)?;

    let status = state.store.delete(status_id, account_id)?;

    state
        .broker
        .publish(&account_id, StatusEvent::Delete(status.id));
    state.metrics.status_deleted();

    log::info!("Deleted status {} for account {}", status.id, account_id);

    Ok(Json(DeleteResponse {
        deleted_id: status.id.to_string(),
    }))
}

pub(crate) fn parse_status_id(raw: &str) -> ApiResult<StatusId> {
    raw.parse::<u64>()
        .map(StatusId::new)
        .map_err(|_| ApiError::validation(format!("Invalid status id '{}'", raw), "id"))
}

fn validate_language(language: &str) -> ApiResult<String> {
    let language = language.trim();
    let valid = (2..=8).contains(&language.len())
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');

    if !valid {
        return Err(ApiError::validation(
            format!("Invalid language code '{}'", language),
            "language",
        ));
    }

    Ok(language.to_ascii_lowercase())
}
