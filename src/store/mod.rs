//! In-memory holder of the most recently delivered batch.
//!
//! The subscriber's delivery handler writes and its query handler reads,
//! possibly at the same time. The batch lives behind an atomically
//! swapped immutable snapshot: a reader always observes a complete
//! pre-write or post-write batch, never a torn one.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::forecast::WeatherForecast;

/// Concurrency-safe container for the last delivered batch.
///
/// Created empty; each successful delivery replaces the whole contents.
/// Nothing is persisted beyond the process.
#[derive(Debug, Default)]
pub struct ForecastStore {
    current: RwLock<Arc<Vec<WeatherForecast>>>,
}

impl ForecastStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire contents with a newly delivered batch.
    ///
    /// Overlapping replacements resolve as last-write-wins in the order
    /// the calls complete.
    pub async fn replace(&self, batch: Vec<WeatherForecast>) {
        *self.current.write().await = Arc::new(batch);
    }

    /// Snapshot of the current batch; empty until the first delivery.
    pub async fn snapshot(&self) -> Arc<Vec<WeatherForecast>> {
        Arc::clone(&*self.current.read().await)
    }
}

#[cfg(test)]
mod tests;
