use crate::OverflowPolicy;
use crate::tests::broker_with;

use futures::StreamExt;
use tokio::sync::oneshot;
use tokio::time::{Duration, timeout};

#[tokio::test]
async fn given_waiting_subscriber_when_published_then_woken_with_value() {
    // Given
    let broker = broker_with(4, OverflowPolicy::DropOldest);
    let mut subscription = broker.subscribe("u1".to_string()).unwrap();
    let waiter = tokio::spawn(async move { subscription.recv().await });

    // When
    tokio::time::sleep(Duration::from_millis(10)).await;
    broker.publish("u1", 99);

    // Then
    let received = timeout(Duration::from_millis(500), waiter)
        .await
        .expect("subscriber should wake")
        .expect("task should not panic");
    assert_eq!(received, Some(99));
}

#[tokio::test]
async fn given_idle_subscriber_when_nothing_published_then_recv_keeps_waiting() {
    let broker = broker_with(4, OverflowPolicy::DropOldest);
    let mut subscription = broker.subscribe("u1".to_string()).unwrap();

    let result = timeout(Duration::from_millis(50), subscription.recv()).await;

    assert!(result.is_err(), "recv has no timeout of its own");
    assert!(!subscription.is_disconnected());
}

#[tokio::test]
async fn given_disconnected_subscription_when_recv_then_end_of_stream() {
    // Given
    let broker = broker_with(4, OverflowPolicy::DropOldest);
    let mut subscription = broker.subscribe("u1".to_string()).unwrap();
    broker.publish("u1", 1);

    // When
    subscription.disconnect();

    // Then - the buffered value was released with the queue
    assert_eq!(subscription.recv().await, None);
    assert_eq!(subscription.buffered(), 0);
}

#[tokio::test]
async fn given_disconnect_called_twice_when_checked_then_second_is_noop() {
    // Given
    let broker = broker_with(4, OverflowPolicy::DropOldest);
    let mut subscription = broker.subscribe("u1".to_string()).unwrap();
    let _other = broker.subscribe("u9".to_string()).unwrap();

    // When
    subscription.disconnect();
    subscription.disconnect();

    // Then
    assert!(subscription.is_disconnected());
    assert_eq!(broker.total_subscribers(), 1);
    assert_eq!(broker.channel_count(), 1);
}

#[tokio::test]
async fn given_cancellation_when_waiting_then_returns_none_and_disconnects() {
    // Given
    let broker = broker_with(4, OverflowPolicy::DropOldest);
    let mut subscription = broker.subscribe("u1".to_string()).unwrap();
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let _ = cancel_tx.send(());
    });

    // When
    let result = timeout(
        Duration::from_millis(500),
        subscription.recv_until(async move {
            let _ = cancel_rx.await;
        }),
    )
    .await
    .expect("cancellation should be observed promptly");

    // Then
    assert_eq!(result, None);
    assert!(subscription.is_disconnected());
    assert!(!broker.contains_key("u1"));
}

#[tokio::test]
async fn given_value_available_when_recv_until_then_value_returned() {
    let broker = broker_with(4, OverflowPolicy::DropOldest);
    let mut subscription = broker.subscribe("u1".to_string()).unwrap();
    broker.publish("u1", 3);

    let result = subscription.recv_until(std::future::pending()).await;

    assert_eq!(result, Some(3));
    assert!(!subscription.is_disconnected());
}

#[tokio::test]
async fn given_consumer_task_aborted_when_joined_then_channel_reclaimed() {
    // Given
    let broker = broker_with(4, OverflowPolicy::DropOldest);
    let mut subscription = broker.subscribe("u1".to_string()).unwrap();
    let consumer = tokio::spawn(async move { subscription.recv().await });
    tokio::time::sleep(Duration::from_millis(10)).await;

    // When
    consumer.abort();
    let _ = consumer.await;

    // Then
    assert_eq!(broker.channel_count(), 0);
    assert_eq!(broker.total_subscribers(), 0);
}

#[tokio::test]
async fn given_overflowed_subscription_when_recv_then_drains_then_ends() {
    let broker = broker_with(2, OverflowPolicy::Disconnect);
    let mut subscription = broker.subscribe("u1".to_string()).unwrap();
    for value in 0..5 {
        broker.publish("u1", value);
    }

    assert_eq!(subscription.recv().await, Some(0));
    assert_eq!(subscription.recv().await, Some(1));
    assert_eq!(subscription.recv().await, None);
}

#[tokio::test]
async fn given_subscription_stream_when_values_published_then_stream_yields_them() {
    // Given
    let broker = broker_with(4, OverflowPolicy::DropOldest);
    let subscription = broker.subscribe("u1".to_string()).unwrap();
    for value in [4, 5, 6] {
        broker.publish("u1", value);
    }

    // When
    let received: Vec<u32> = subscription.into_stream().take(3).collect().await;

    // Then
    assert_eq!(received, vec![4, 5, 6]);
    assert_eq!(broker.channel_count(), 0);
}

#[tokio::test]
async fn given_lagging_subscriber_when_lag_taken_then_reported_once() {
    let broker = broker_with(1, OverflowPolicy::DropOldest);
    let mut subscription = broker.subscribe("u1".to_string()).unwrap();
    for value in 0..4 {
        broker.publish("u1", value);
    }

    assert_eq!(subscription.take_lagged(), 3);
    assert_eq!(subscription.take_lagged(), 0);
    assert_eq!(subscription.dropped_count(), 3);
    assert_eq!(subscription.recv().await, Some(3));
}
