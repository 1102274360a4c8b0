//! In-memory mock transport for testing.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{PubSubTransport, Result, TransportError};
use crate::forecast::WeatherForecast;

/// One recorded publish call.
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub pubsub_name: String,
    pub topic: String,
    pub forecast: WeatherForecast,
}

/// Transport that records publishes instead of crossing a process
/// boundary, with optional failure injection.
#[derive(Debug, Default)]
pub struct MockTransport {
    published: RwLock<Vec<PublishedEvent>>,
    fail: AtomicBool,
}

impl MockTransport {
    /// Create a mock that accepts every publish.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that refuses every publish.
    pub fn failing() -> Self {
        let mock = Self::default();
        mock.set_failing(true);
        mock
    }

    /// Toggle failure injection.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// All publishes recorded so far, in call order.
    pub async fn published(&self) -> Vec<PublishedEvent> {
        self.published.read().await.clone()
    }

    /// Number of publishes recorded so far.
    pub async fn publish_count(&self) -> usize {
        self.published.read().await.len()
    }
}

#[async_trait]
impl PubSubTransport for MockTransport {
    async fn publish(
        &self,
        pubsub_name: &str,
        topic: &str,
        forecast: &WeatherForecast,
    ) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable(
                "mock transport set to fail".to_string(),
            ));
        }

        self.published.write().await.push(PublishedEvent {
            pubsub_name: pubsub_name.to_string(),
            topic: topic.to_string(),
            forecast: forecast.clone(),
        });
        Ok(())
    }
}
