use nx_broker::{BrokerConfig, KeyedBroker, OverflowPolicy};

use std::collections::HashMap;

use tokio::time::{Duration, timeout};

const PRODUCERS: u32 = 4;
const VALUES_PER_PRODUCER: u32 = 250;
const SUBSCRIBERS: usize = 3;

fn broker(queue_capacity: usize) -> KeyedBroker<String, (u32, u32)> {
    KeyedBroker::new(BrokerConfig {
        queue_capacity,
        overflow_policy: OverflowPolicy::DropOldest,
        ..BrokerConfig::default()
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_concurrent_producers_when_subscribers_read_then_all_see_one_global_order() {
    // Given - queues large enough that nothing is dropped
    let total = (PRODUCERS * VALUES_PER_PRODUCER) as usize;
    let broker = broker(total);

    let mut readers = Vec::new();
    for _ in 0..SUBSCRIBERS {
        let mut subscription = broker.subscribe("hot".to_string()).unwrap();
        readers.push(tokio::spawn(async move {
            let mut received = Vec::with_capacity(total);
            while received.len() < total {
                match subscription.recv().await {
                    Some(value) => received.push(value),
                    None => break,
                }
            }
            received
        }));
    }

    // When
    let mut producers = Vec::new();
    for producer in 0..PRODUCERS {
        let broker = broker.clone();
        producers.push(tokio::spawn(async move {
            for seq in 0..VALUES_PER_PRODUCER {
                broker.publish("hot", (producer, seq));
                if seq % 32 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        }));
    }
    for producer in producers {
        producer.await.unwrap();
    }

    // Then
    let mut sequences = Vec::new();
    for reader in readers {
        let received = timeout(Duration::from_secs(10), reader)
            .await
            .expect("readers should not deadlock")
            .unwrap();
        assert_eq!(received.len(), total);

        let mut last_seen: HashMap<u32, u32> = HashMap::new();
        for (producer, seq) in &received {
            if let Some(previous) = last_seen.insert(*producer, *seq) {
                assert!(previous < *seq, "per-producer order must be preserved");
            }
        }
        sequences.push(received);
    }

    for sequence in &sequences[1..] {
        assert_eq!(sequence, &sequences[0]);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_slow_subscriber_when_flooded_then_publishers_never_block() {
    // Given - a subscriber that never reads
    let broker = broker(4);
    let _stalled = broker.subscribe("slow".to_string()).unwrap();

    // When
    let flood = {
        let broker = broker.clone();
        tokio::spawn(async move {
            for seq in 0..10_000 {
                broker.publish("slow", (0, seq));
            }
        })
    };

    // Then
    timeout(Duration::from_secs(5), flood)
        .await
        .expect("publishing must not wait on a stalled subscriber")
        .unwrap();

    let mut other = broker.subscribe("fast".to_string()).unwrap();
    broker.publish("fast", (1, 1));
    assert_eq!(other.recv().await, Some((1, 1)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_subscribe_disconnect_churn_when_racing_then_no_subscriber_orphaned() {
    // Given
    let broker = broker(1024);
    let mut workers = Vec::new();

    // When - every worker repeatedly joins the key, publishes a marker and
    // expects to see it; an orphaned subscription would never receive it
    for worker in 0..8u32 {
        let broker = broker.clone();
        workers.push(tokio::spawn(async move {
            for round in 0..200u32 {
                let mut subscription = broker.subscribe("churn".to_string()).unwrap();
                broker.publish("churn", (worker, round));

                let marker = timeout(Duration::from_secs(2), async {
                    while let Some(value) = subscription.recv().await {
                        if value == (worker, round) {
                            return true;
                        }
                    }
                    false
                })
                .await
                .unwrap_or(false);

                assert!(marker, "worker {} round {} lost its marker", worker, round);
                subscription.disconnect();
            }
        }));
    }

    for worker in workers {
        worker.await.unwrap();
    }

    // Then
    assert_eq!(broker.channel_count(), 0);
    assert_eq!(broker.total_subscribers(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_many_keys_when_used_concurrently_then_all_channels_reclaimed() {
    let broker = broker(16);
    let mut tasks = Vec::new();

    for key in 0..32u32 {
        let broker = broker.clone();
        tasks.push(tokio::spawn(async move {
            let name = format!("account-{}", key);
            let mut subscription = broker.subscribe(name.clone()).unwrap();
            broker.publish(name.as_str(), (key, 0));
            subscription.recv().await
        }));
    }

    for (key, task) in tasks.into_iter().enumerate() {
        assert_eq!(task.await.unwrap(), Some((key as u32, 0)));
    }

    assert_eq!(broker.channel_count(), 0);
}
