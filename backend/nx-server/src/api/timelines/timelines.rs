//! Timeline REST API handlers

use crate::{
    ApiResult, AppState, CurrentAccount, MaybeAccount, StatusDto, TimelineQuery, TimelineResponse,
};

use axum::{
    Json,
    extract::{Query, State},
};

/// GET /api/v1/timelines/public
pub async fn public_timeline(
    State(state): State<AppState>,
    MaybeAccount(viewer): MaybeAccount,
    Query(query): Query<TimelineQuery>,
) -> ApiResult<Json<TimelineResponse>> {
    let limit = state.timeline.clamp(query.limit);
    let statuses = state.store.latest(limit);

    log::debug!(
        "Public timeline for {} ({} of limit {})",
        viewer.map_or_else(|| "anonymous".to_string(), |id| id.to_string()),
        statuses.len(),
        limit
    );

    Ok(Json(TimelineResponse {
        statuses: statuses.iter().map(StatusDto::from).collect(),
    }))
}

/// GET /api/v1/timelines/home
pub async fn home_timeline(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Query(query): Query<TimelineQuery>,
) -> ApiResult<Json<TimelineResponse>> {
    let limit = state.timeline.clamp(query.limit);
    let statuses = state.store.by_account(account_id, limit);

    log::debug!(
        "Home timeline for account {} ({} of limit {})",
        account_id,
        statuses.len(),
        limit
    );

    Ok(Json(TimelineResponse {
        statuses: statuses.iter().map(StatusDto::from).collect(),
    }))
}
