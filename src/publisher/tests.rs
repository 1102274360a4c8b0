use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::transport::{MockTransport, PubSubTransport, TransportError};

const TICK: Duration = Duration::from_secs(5);

/// Let spawned tasks reach their await points under paused time.
async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_loop_publishes_once_per_tick() {
    let mock = Arc::new(MockTransport::new());
    let handle = spawn(PublisherLoop::new(Arc::clone(&mock) as Arc<dyn PubSubTransport>, TICK));

    settle().await;
    assert_eq!(mock.publish_count().await, 1);

    tokio::time::advance(TICK).await;
    settle().await;
    assert_eq!(mock.publish_count().await, 2);

    handle.stop();
    handle.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_no_publish_after_cancellation() {
    let mock = Arc::new(MockTransport::new());
    let handle = spawn(PublisherLoop::new(Arc::clone(&mock) as Arc<dyn PubSubTransport>, TICK));

    settle().await;
    assert_eq!(mock.publish_count().await, 1);

    // Signal mid-interval: the loop must wake, skip the pending tick,
    // and terminate without another publish.
    tokio::time::advance(TICK / 2).await;
    handle.stop();
    handle.join().await.unwrap();

    tokio::time::advance(TICK * 3).await;
    settle().await;
    assert_eq!(mock.publish_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_before_first_iteration() {
    let mock = Arc::new(MockTransport::new());
    let (cancel_tx, cancel_rx) = tokio::sync::watch::channel(true);

    let publisher = PublisherLoop::new(Arc::clone(&mock) as Arc<dyn PubSubTransport>, TICK);
    publisher.run(cancel_rx).await.unwrap();
    drop(cancel_tx);

    assert_eq!(mock.publish_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_publish_failure_terminates_loop_with_error() {
    let mock = Arc::new(MockTransport::failing());
    let handle = spawn(PublisherLoop::new(Arc::clone(&mock) as Arc<dyn PubSubTransport>, TICK));

    settle().await;
    let result = handle.join().await;
    assert!(matches!(
        result,
        Err(PublisherError::Transport(TransportError::Unavailable(_)))
    ));

    // No retry: the dead transport saw exactly one attempt
    tokio::time::advance(TICK * 3).await;
    assert_eq!(mock.publish_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_sender_counts_as_cancellation() {
    let mock = Arc::new(MockTransport::new());
    let (cancel_tx, cancel_rx) = tokio::sync::watch::channel(false);
    let task = tokio::spawn(PublisherLoop::new(Arc::clone(&mock) as Arc<dyn PubSubTransport>, TICK).run(cancel_rx));
    drop(cancel_tx);

    // The closed channel must read as "stop", not as a permanently
    // ready select arm that skips the sleep and busy-publishes.
    settle().await;
    task.await.unwrap().unwrap();
    assert!(mock.publish_count().await <= 1);
}

#[tokio::test(start_paused = true)]
async fn test_sender_dropped_mid_interval_stops_loop() {
    let mock = Arc::new(MockTransport::new());
    let (cancel_tx, cancel_rx) = tokio::sync::watch::channel(false);
    let task = tokio::spawn(PublisherLoop::new(Arc::clone(&mock) as Arc<dyn PubSubTransport>, TICK).run(cancel_rx));

    settle().await;
    assert_eq!(mock.publish_count().await, 1);

    drop(cancel_tx);
    settle().await;
    task.await.unwrap().unwrap();

    tokio::time::advance(TICK * 3).await;
    settle().await;
    assert_eq!(mock.publish_count().await, 1);
}

#[tokio::test]
async fn test_join_reports_task_panic_distinctly() {
    let (cancel, _cancel_rx) = tokio::sync::watch::channel(false);
    let task: tokio::task::JoinHandle<Result<(), TransportError>> =
        tokio::spawn(async { panic!("loop crashed") });
    let handle = PublisherHandle { cancel, task };

    let result = handle.join().await;
    assert!(matches!(result, Err(PublisherError::Join(_))));
}

#[tokio::test(start_paused = true)]
async fn test_published_events_target_registered_topic() {
    let mock = Arc::new(MockTransport::new());
    let handle = spawn(PublisherLoop::new(Arc::clone(&mock) as Arc<dyn PubSubTransport>, TICK));

    settle().await;
    handle.stop();
    handle.join().await.unwrap();

    let published = mock.published().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].pubsub_name, crate::subscription::PUBSUB_NAME);
    assert_eq!(published[0].topic, crate::subscription::WEATHER_TOPIC);
}
