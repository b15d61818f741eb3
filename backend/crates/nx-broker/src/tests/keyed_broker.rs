use crate::tests::{broker_with, drain};
use crate::{BrokerConfig, BrokerError, KeyedBroker, OverflowPolicy};

const CAPACITY: usize = 8;

#[test]
fn given_no_subscribers_when_published_then_noop_and_no_channel() {
    // Given
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);

    // When
    let delivered = broker.publish("nobody", 1);

    // Then
    assert_eq!(delivered, 0);
    assert!(!broker.contains_key("nobody"));
    assert_eq!(broker.channel_count(), 0);
}

#[test]
fn given_new_key_when_subscribed_then_channel_created_on_demand() {
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);

    let subscription = broker.subscribe("u1".to_string()).unwrap();

    assert!(broker.contains_key("u1"));
    assert_eq!(broker.subscriber_count("u1"), 1);
    assert_eq!(broker.total_subscribers(), 1);
    assert_eq!(subscription.key(), "u1");
}

#[test]
fn given_two_subscribers_same_key_when_subscribed_then_share_one_channel() {
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);

    let _first = broker.subscribe("u1".to_string()).unwrap();
    let _second = broker.subscribe("u1".to_string()).unwrap();

    assert_eq!(broker.channel_count(), 1);
    assert_eq!(broker.subscriber_count("u1"), 2);
}

#[test]
fn given_subscriptions_when_created_then_ids_are_unique() {
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);

    let first = broker.subscribe("u1".to_string()).unwrap();
    let second = broker.subscribe("u1".to_string()).unwrap();
    let third = broker.subscribe("u2".to_string()).unwrap();

    assert_ne!(first.id(), second.id());
    assert_ne!(second.id(), third.id());
}

#[test]
fn given_subscriber_when_published_then_receives_in_order() {
    // Given
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);
    let mut subscription = broker.subscribe("u1".to_string()).unwrap();

    // When
    for value in 1..=3 {
        assert_eq!(broker.publish("u1", value), 1);
    }

    // Then
    assert_eq!(drain(&mut subscription), vec![1, 2, 3]);
}

#[test]
fn given_values_published_before_subscribe_when_subscribed_then_no_backlog() {
    // Given
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);
    let _early = broker.subscribe("u1".to_string()).unwrap();
    broker.publish("u1", 1);

    // When
    let mut late = broker.subscribe("u1".to_string()).unwrap();
    broker.publish("u1", 2);

    // Then
    assert_eq!(drain(&mut late), vec![2]);
}

#[test]
fn given_subscribers_on_other_key_when_published_then_not_delivered() {
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);
    let mut other = broker.subscribe("u2".to_string()).unwrap();

    let delivered = broker.publish("u1", 1);

    assert_eq!(delivered, 0);
    assert!(drain(&mut other).is_empty());
}

#[test]
fn given_slow_and_fast_subscriber_when_overfilled_then_both_keep_most_recent() {
    // Given - A is never drained while publishing, and neither is B
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);
    let mut a = broker.subscribe("u1".to_string()).unwrap();
    let mut b = broker.subscribe("u1".to_string()).unwrap();
    let total = CAPACITY as u32 + 5;

    // When
    for value in 0..total {
        assert_eq!(broker.publish("u1", value), 2);
    }

    // Then - each holds exactly the C most recent values, oldest 5 dropped
    let expected: Vec<u32> = (5..total).collect();
    assert_eq!(drain(&mut b), expected);
    assert_eq!(drain(&mut a), expected);
    assert_eq!(a.dropped_count(), 5);
    assert!(a.is_lagging());
}

#[test]
fn given_lagging_subscriber_when_other_key_used_then_unaffected() {
    // Given
    let broker = broker_with(2, OverflowPolicy::DropOldest);
    let _stalled = broker.subscribe("u1".to_string()).unwrap();
    for value in 0..10 {
        broker.publish("u1", value);
    }

    // When
    let mut other = broker.subscribe("u3".to_string()).unwrap();
    let delivered = broker.publish("u3", 42);

    // Then
    assert_eq!(delivered, 1);
    assert_eq!(drain(&mut other), vec![42]);
    assert_eq!(other.dropped_count(), 0);
}

#[test]
fn given_last_subscriber_disconnects_when_published_then_noop() {
    // Given
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);
    let mut subscription = broker.subscribe("u2".to_string()).unwrap();

    // When
    subscription.disconnect();

    // Then
    assert!(!broker.contains_key("u2"));
    assert_eq!(broker.publish("u2", 1), 0);
    assert_eq!(broker.total_subscribers(), 0);

    let mut fresh = broker.subscribe("u2".to_string()).unwrap();
    assert!(fresh.try_recv().is_none());
}

#[test]
fn given_one_of_two_disconnects_when_published_then_channel_kept() {
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);
    let mut leaving = broker.subscribe("u1".to_string()).unwrap();
    let mut staying = broker.subscribe("u1".to_string()).unwrap();

    leaving.disconnect();

    assert!(broker.contains_key("u1"));
    assert_eq!(broker.publish("u1", 5), 1);
    assert_eq!(drain(&mut staying), vec![5]);
}

#[test]
fn given_subscription_dropped_when_checked_then_channel_reclaimed() {
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);

    {
        let _subscription = broker.subscribe("u1".to_string()).unwrap();
        assert_eq!(broker.channel_count(), 1);
    }

    assert_eq!(broker.channel_count(), 0);
    assert_eq!(broker.total_subscribers(), 0);
}

#[test]
fn given_subscriber_ceiling_when_exceeded_then_resource_exhausted() {
    // Given
    let broker: KeyedBroker<String, u32> = KeyedBroker::new(BrokerConfig {
        max_subscribers: 2,
        ..BrokerConfig::default()
    });
    let first = broker.subscribe("u1".to_string()).unwrap();
    let _second = broker.subscribe("u2".to_string()).unwrap();

    // When
    let result = broker.subscribe("u3".to_string());

    // Then
    assert!(matches!(
        result,
        Err(BrokerError::ResourceExhausted {
            current: 2,
            max: 2,
            ..
        })
    ));
    assert!(!broker.contains_key("u3"));

    drop(first);
    assert!(broker.subscribe("u3".to_string()).is_ok());
}

#[test]
fn given_disconnect_policy_when_sole_subscriber_overflows_then_channel_reclaimed() {
    // Given
    let broker = broker_with(2, OverflowPolicy::Disconnect);
    let mut slow = broker.subscribe("u1".to_string()).unwrap();

    // When
    for value in 0..3 {
        broker.publish("u1", value);
    }

    // Then
    assert!(slow.is_closed());
    assert!(!broker.contains_key("u1"));
    assert_eq!(broker.total_subscribers(), 0);
    assert_eq!(drain(&mut slow), vec![0, 1]);

    // Disconnecting afterwards must not release the slot twice
    slow.disconnect();
    assert_eq!(broker.total_subscribers(), 0);
}

#[test]
fn given_cloned_broker_when_published_then_shares_registry() {
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);
    let producer = broker.clone();
    let mut subscription = broker.subscribe("u1".to_string()).unwrap();

    producer.publish("u1", 11);

    assert_eq!(drain(&mut subscription), vec![11]);
}

#[test]
fn given_active_keys_when_listed_then_contains_only_subscribed_keys() {
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);
    let _a = broker.subscribe("a".to_string()).unwrap();
    let _b = broker.subscribe("b".to_string()).unwrap();
    broker.publish("c", 1);

    let mut keys = broker.active_keys();
    keys.sort();

    assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn given_broker_dropped_when_subscription_disconnects_then_no_panic() {
    let broker = broker_with(CAPACITY, OverflowPolicy::DropOldest);
    let mut subscription = broker.subscribe("u1".to_string()).unwrap();

    drop(broker);
    subscription.disconnect();

    assert!(subscription.is_disconnected());
}
