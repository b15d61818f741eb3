use crate::{ApiError, ApiResult, AppState, CurrentAccount, StreamConnection};

use axum::{
    extract::{State, ws::WebSocketUpgrade},
    response::Response,
};
use tracing::Instrument;

/// GET /api/v1/streaming/user
///
/// Subscribes before upgrading so a full broker answers 503 instead of
/// accepting a socket it cannot feed.
pub async fn stream_user(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let subscription = state.broker.subscribe(account_id).map_err(|e| {
        log::warn!("Refusing stream for account {}: {}", account_id, e);
        state.metrics.stream_rejected();
        ApiError::from(e)
    })?;

    let span = tracing::info_span!(
        "stream",
        account_id = %account_id,
        subscription = %subscription.id()
    );

    let connection = StreamConnection::new(
        account_id,
        subscription,
        state.stream_config.clone(),
        state.metrics.clone(),
    );
    let shutdown_guard = state.shutdown.subscribe_guard();

    Ok(ws.on_upgrade(move |socket| {
        async move {
            // Errors are logged and counted by the connection
            let _ = connection.handle(socket, shutdown_guard).await;
        }
        .instrument(span)
    }))
}
