//! weathervane-publisher: timed weather event emitter
//!
//! Publishes one randomized weather observation to the `weather` topic
//! every interval, through the local pub/sub sidecar. Ctrl-C stops the
//! loop cleanly; a failed publish ends the process with the error, since
//! further attempts against a dead sidecar are meaningless.
//!
//! ## Configuration
//! - DAPR_HTTP_PORT: sidecar HTTP port (default: 3500)
//! - PUBLISH_INTERVAL_SECS: pause between publishes (default: 5)
//! - WEATHERVANE_LOG: log filter (default: info)

use std::sync::Arc;

use tracing::info;

use weathervane::config::PublisherConfig;
use weathervane::publisher::PublisherLoop;
use weathervane::transport::DaprTransport;
use weathervane::utils::bootstrap::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = PublisherConfig::from_env();
    info!(
        dapr_http_port = config.dapr_http_port,
        interval_secs = config.publish_interval.as_secs(),
        "starting weathervane-publisher"
    );

    let (cancel_tx, cancel_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            let _ = cancel_tx.send(true);
        }
    });

    let transport = Arc::new(DaprTransport::new(config.dapr_http_port));
    let publisher = PublisherLoop::new(transport, config.publish_interval);
    publisher.run(cancel_rx).await?;

    Ok(())
}
