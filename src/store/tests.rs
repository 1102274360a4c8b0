use std::sync::Arc;

use chrono::NaiveDate;

use super::*;
use crate::forecast::WeatherForecast;

fn batch_of(temperature_c: i32, len: usize) -> Vec<WeatherForecast> {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..len)
        .map(|_| WeatherForecast::new(date, temperature_c))
        .collect()
}

#[tokio::test]
async fn test_store_starts_empty() {
    let store = ForecastStore::new();
    assert!(store.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_replace_swaps_entire_contents() {
    let store = ForecastStore::new();

    let first = batch_of(10, 3);
    store.replace(first).await;
    assert_eq!(store.snapshot().await.len(), 3);

    // A later delivery fully replaces the earlier one, never appends
    let second = batch_of(25, 1);
    store.replace(second.clone()).await;
    let snapshot = store.snapshot().await;
    assert_eq!(*snapshot, second);
}

#[tokio::test]
async fn test_replace_is_idempotent() {
    let store = ForecastStore::new();
    let batch = batch_of(5, 2);

    store.replace(batch.clone()).await;
    store.replace(batch.clone()).await;

    assert_eq!(*store.snapshot().await, batch);
}

#[tokio::test]
async fn test_snapshot_outlives_replacement() {
    let store = ForecastStore::new();
    store.replace(batch_of(10, 2)).await;

    let snapshot = store.snapshot().await;
    store.replace(batch_of(30, 5)).await;

    // The old snapshot is still the complete pre-write batch
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.iter().all(|f| f.temperature_c == 10));
}

#[tokio::test]
async fn test_concurrent_reads_never_observe_torn_batches() {
    let store = Arc::new(ForecastStore::new());
    store.replace(batch_of(0, 4)).await;

    // Writers replace with homogeneous batches; a torn read would mix
    // temperatures from two different deliveries.
    let mut tasks = Vec::new();
    for temperature in 1..=8 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            for _ in 0..50 {
                store.replace(batch_of(temperature, 4)).await;
            }
        }));
    }
    for _ in 0..8 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            for _ in 0..100 {
                let snapshot = store.snapshot().await;
                let first = snapshot[0].temperature_c;
                assert!(snapshot.iter().all(|f| f.temperature_c == first));
            }
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }
}
