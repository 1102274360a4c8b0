//! HTTP transport against a Dapr-style pub/sub sidecar.
//!
//! Publishing is a JSON POST to the sidecar's publish URL; the sidecar
//! owns envelope wrapping, retries, and delivery to subscribers. Any
//! non-2xx answer is a refused publish.

use async_trait::async_trait;
use tracing::debug;

use super::{PubSubTransport, Result, TransportError};
use crate::forecast::WeatherForecast;

/// Pub/sub client speaking the sidecar's HTTP publish API.
#[derive(Debug, Clone)]
pub struct DaprTransport {
    client: reqwest::Client,
    base_url: String,
}

impl DaprTransport {
    /// Client for a sidecar listening on `port` of localhost.
    pub fn new(port: u16) -> Self {
        Self::with_base_url(format!("http://127.0.0.1:{}", port))
    }

    /// Client for a sidecar at an explicit base URL (no trailing slash).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn publish_url(&self, pubsub_name: &str, topic: &str) -> String {
        format!("{}/v1.0/publish/{}/{}", self.base_url, pubsub_name, topic)
    }
}

#[async_trait]
impl PubSubTransport for DaprTransport {
    async fn publish(
        &self,
        pubsub_name: &str,
        topic: &str,
        forecast: &WeatherForecast,
    ) -> Result<()> {
        let response = self
            .client
            .post(self.publish_url(pubsub_name, topic))
            .json(forecast)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Rejected {
                topic: topic.to_string(),
                status,
            });
        }

        debug!(topic = topic, status = %status, "event published");
        Ok(())
    }
}
