//! Pub/sub transport boundary.
//!
//! This module contains:
//! - `PubSubTransport` trait: publishing an observation to a named topic
//! - `TransportError`: failures crossing the sidecar boundary
//! - Implementations: HTTP sidecar (Dapr-style), in-memory mock
//!
//! The broker behind the trait owns delivery, retries, and topic routing;
//! this crate only hands it messages and reacts to acceptance or refusal.

use async_trait::async_trait;

use crate::forecast::WeatherForecast;

pub mod dapr;
pub mod mock;

pub use dapr::DaprTransport;
pub use mock::MockTransport;

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur when handing an event to the broker.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport unavailable: {0}")]
    Unavailable(String),

    #[error("publish request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("broker rejected publish to '{topic}': {status}")]
    Rejected {
        topic: String,
        status: reqwest::StatusCode,
    },
}

/// Interface for publishing observations to a pub/sub topic.
///
/// Implementations:
/// - `DaprTransport`: HTTP publish calls against a local sidecar
/// - `MockTransport`: in-memory recorder for testing
#[async_trait]
pub trait PubSubTransport: Send + Sync {
    /// Publish one observation to `topic` on the named pub/sub component.
    ///
    /// `pubsub_name` and `topic` must byte-for-byte match the subscriber's
    /// registration for delivery to occur.
    async fn publish(
        &self,
        pubsub_name: &str,
        topic: &str,
        forecast: &WeatherForecast,
    ) -> Result<()>;
}
