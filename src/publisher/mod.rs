//! Timed emission loop for the publisher process.
//!
//! One long-lived task creates an observation per tick and hands it to
//! the transport. The inter-tick sleep is interruptible: once the
//! cancellation signal is observed, no further publish call begins and
//! the loop ends without error within one tick.
//!
//! Publish failures are not retried here. A refused or unreachable
//! broker ends the loop with the error, which the binary propagates;
//! redelivery guarantees belong to the transport.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::forecast::WeatherFactory;
use crate::subscription::{PUBSUB_NAME, WEATHER_TOPIC};
use crate::transport::{PubSubTransport, TransportError};

/// Default pause between publishes.
pub const DEFAULT_PUBLISH_INTERVAL: Duration = Duration::from_secs(5);

/// Errors a spawned publisher loop can end with.
#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("publisher task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// The publisher's emission loop.
pub struct PublisherLoop {
    factory: WeatherFactory,
    transport: Arc<dyn PubSubTransport>,
    interval: Duration,
}

impl PublisherLoop {
    /// Create a loop publishing through `transport` every `interval`.
    pub fn new(transport: Arc<dyn PubSubTransport>, interval: Duration) -> Self {
        Self {
            factory: WeatherFactory::new(),
            transport,
            interval,
        }
    }

    /// Run until cancelled or until a publish fails.
    ///
    /// Cancellation is observed at the top of the loop and during the
    /// inter-tick sleep; either way the loop returns `Ok` without
    /// another publish call. Dropping the cancel sender cancels too,
    /// since a closed channel can never signal later. A publish failure
    /// is logged and returned.
    pub async fn run(
        self,
        mut cancel_rx: watch::Receiver<bool>,
    ) -> Result<(), TransportError> {
        info!(
            interval_secs = self.interval.as_secs(),
            topic = WEATHER_TOPIC,
            "publisher loop started"
        );

        loop {
            // A dropped sender counts as cancellation; the channel can
            // never signal again once it is closed.
            if *cancel_rx.borrow() || cancel_rx.has_changed().is_err() {
                break;
            }

            info!(topic = WEATHER_TOPIC, "publishing weather event");
            let forecast = self.factory.create_weather();
            if let Err(e) = self
                .transport
                .publish(PUBSUB_NAME, WEATHER_TOPIC, &forecast)
                .await
            {
                error!(error = %e, "publish failed, stopping publisher loop");
                return Err(e);
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                changed = cancel_rx.changed() => {
                    if changed.is_err() || *cancel_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("publisher loop stopped");
        Ok(())
    }
}

// ============================================================================
// Spawned task handle
// ============================================================================

/// Handle to a spawned publisher loop.
pub struct PublisherHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<Result<(), TransportError>>,
}

impl PublisherHandle {
    /// Signal the loop to stop after the in-flight iteration.
    pub fn stop(&self) {
        let _ = self.cancel.send(true);
    }

    /// Wait for the loop task to finish and surface its outcome.
    ///
    /// A publish failure and a panicked task stay distinguishable, so a
    /// crash inside the loop is never logged as a broker outage.
    pub async fn join(self) -> Result<(), PublisherError> {
        self.task.await??;
        Ok(())
    }
}

/// Spawn the loop on the runtime, returning a stop/join handle.
pub fn spawn(publisher: PublisherLoop) -> PublisherHandle {
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let task = tokio::spawn(publisher.run(cancel_rx));
    PublisherHandle {
        cancel: cancel_tx,
        task,
    }
}

#[cfg(test)]
mod tests;
