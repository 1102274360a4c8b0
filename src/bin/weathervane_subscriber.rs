//! weathervane-subscriber: weather delivery webhook and query API
//!
//! Serves the endpoints the pub/sub sidecar needs on the subscribing
//! side: the subscription table it discovers at startup, the delivery
//! webhook it pushes `weather` messages to, and a query endpoint for
//! the latest delivered batch. The batch lives in memory only.
//!
//! ## Configuration
//! - PORT: listen port (default: 5000)
//! - WEATHERVANE_LOG: log filter (default: info)

use std::sync::Arc;

use tracing::{error, info};

use weathervane::config::SubscriberConfig;
use weathervane::store::ForecastStore;
use weathervane::subscriber;
use weathervane::utils::bootstrap::init_tracing;

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => error!(error = %e, "failed to listen for shutdown signal"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let config = SubscriberConfig::from_env();
    info!(port = config.port, "starting weathervane-subscriber");

    let store = Arc::new(ForecastStore::new());
    subscriber::serve(store, config.port, shutdown_signal()).await
}
