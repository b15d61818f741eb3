use crate::streaming::error::{Result as StreamResult, StreamError};
use crate::{
    AccountId, ServerMetrics, ShutdownGuard, StatusEvent, StreamConfig, StreamFrame,
};

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use nx_broker::Subscription;
use tokio::sync::mpsc;
use tokio::time::{Duration, MissedTickBehavior, timeout};

/// How long the writer may take to flush queued frames after the loop ends
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Why a stream ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    ClientClosed,
    Shutdown,
    /// The broker closed the subscription after its queue overflowed
    Overflow,
}

impl CloseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseReason::ClientClosed => "client_closed",
            CloseReason::Shutdown => "shutdown",
            CloseReason::Overflow => "overflow",
        }
    }
}

/// One client's live stream of an account's statuses
pub struct StreamConnection {
    account_id: AccountId,
    subscription: Subscription<AccountId, StatusEvent>,
    config: StreamConfig,
    metrics: ServerMetrics,
}

impl StreamConnection {
    pub fn new(
        account_id: AccountId,
        subscription: Subscription<AccountId, StatusEvent>,
        config: StreamConfig,
        metrics: ServerMetrics,
    ) -> Self {
        Self {
            account_id,
            subscription,
            config,
            metrics,
        }
    }

    /// Run the stream until the client leaves, the server shuts down or the
    /// subscription is closed. The subscription is disconnected on every exit.
    pub async fn handle(
        self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> StreamResult<CloseReason> {
        let StreamConnection {
            account_id,
            mut subscription,
            config,
            metrics,
        } = self;

        log::info!(
            "Stream {} opened for account {}",
            subscription.id(),
            account_id
        );
        metrics.stream_opened();

        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Bounded so a stalled socket holds back only this loop, never the broker
        let (tx, mut rx) = mpsc::channel::<Message>(config.send_buffer_size);

        let mut send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
            let _ = ws_sender.close().await;
        });

        let mut heartbeat = tokio::time::interval(config.heartbeat_interval);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        heartbeat.tick().await;

        let result = loop {
            tokio::select! {
                event = subscription.recv() => {
                    let Some(event) = event else {
                        log::warn!(
                            "Stream {} for account {} closed by overflow policy",
                            subscription.id(),
                            account_id
                        );
                        break Ok(CloseReason::Overflow);
                    };

                    // A stalled socket must not hide shutdown or a client close
                    tokio::select! {
                        sent = forward(&event, &mut subscription, &tx, &metrics) => {
                            if let Err(e) = sent {
                                break Err(e);
                            }
                        }
                        msg = ws_receiver.next() => {
                            if let Some(outcome) = client_frame(msg, &subscription) {
                                break outcome;
                            }
                        }
                        _ = shutdown_guard.wait() => {
                            log::info!("Shutting down stalled stream {}", subscription.id());
                            break Ok(CloseReason::Shutdown);
                        }
                    }
                }

                msg = ws_receiver.next() => {
                    if let Some(outcome) = client_frame(msg, &subscription) {
                        break outcome;
                    }
                }

                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down stream {} gracefully", subscription.id());
                    break Ok(CloseReason::Shutdown);
                }

                _ = heartbeat.tick() => {
                    // A full buffer already proves the writer is busy
                    if let Err(mpsc::error::TrySendError::Closed(_)) =
                        tx.try_send(Message::Ping(Bytes::new()))
                    {
                        break Err(StreamError::connection_closed("socket writer stopped"));
                    }
                }
            }
        };

        subscription.disconnect();
        drop(tx);
        if timeout(WRITER_DRAIN_TIMEOUT, &mut send_task).await.is_err() {
            log::warn!(
                "Stream {} writer stalled, aborting",
                subscription.id()
            );
            send_task.abort();
        }

        match &result {
            Ok(reason) => metrics.stream_closed(reason.as_str()),
            Err(e) => {
                log::error!("Stream {} error: {}", subscription.id(), e);
                metrics.error_occurred("stream");
                metrics.stream_closed("error");
            }
        }

        log::info!(
            "Stream {} closed for account {}",
            subscription.id(),
            account_id
        );

        result
    }
}

/// Interpret a frame from the client; `Some` ends the stream
fn client_frame(
    msg: Option<Result<Message, axum::Error>>,
    subscription: &Subscription<AccountId, StatusEvent>,
) -> Option<StreamResult<CloseReason>> {
    match msg {
        Some(Ok(Message::Close(_))) | None => {
            log::debug!("Stream {} closed by client", subscription.id());
            Some(Ok(CloseReason::ClientClosed))
        }
        // Streams are one-way; pings are answered by axum
        Some(Ok(_)) => None,
        Some(Err(e)) => Some(Err(StreamError::connection_closed(format!(
            "WebSocket error: {}",
            e
        )))),
    }
}

/// Send one event, preceded by a lag notice when events were dropped
async fn forward(
    event: &StatusEvent,
    subscription: &mut Subscription<AccountId, StatusEvent>,
    tx: &mpsc::Sender<Message>,
    metrics: &ServerMetrics,
) -> StreamResult<()> {
    let dropped = subscription.take_lagged();
    if dropped > 0 {
        log::warn!(
            "Stream {} lagged, dropped {} events",
            subscription.id(),
            dropped
        );
        metrics.stream_lagged(dropped);
        send_frame(&StreamFrame::Lagged { dropped }, tx, metrics).await?;
    }

    send_frame(&StreamFrame::from(event), tx, metrics).await
}

async fn send_frame(
    frame: &StreamFrame<'_>,
    tx: &mpsc::Sender<Message>,
    metrics: &ServerMetrics,
) -> StreamResult<()> {
    tx.send(frame.to_message()?)
        .await
        .map_err(|_| StreamError::connection_closed("socket writer stopped"))?;

    metrics.event_sent(frame.name());
    Ok(())
}
