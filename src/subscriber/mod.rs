//! HTTP surface of the subscriber process.
//!
//! Endpoints:
//! - `POST /weather` — delivery webhook the sidecar pushes topic
//!   messages to; replaces the store and answers `204 No Content`
//! - `GET /weatherforecast` — current store contents
//! - `GET /dapr/subscribe` — subscription table for sidecar discovery
//! - `GET /healthz` — health check
//!
//! The `204` acknowledgment is the at-least-once contract's "processed"
//! signal. A delivery the handler cannot decode answers non-2xx and
//! leaves the store untouched, so the sidecar's redelivery applies.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::forecast::WeatherForecast;
use crate::store::ForecastStore;
use crate::subscription::{Subscription, SUBSCRIPTIONS, WEATHER_ROUTE};

pub mod envelope;

/// Shared state for axum handlers.
pub type SharedStore = Arc<ForecastStore>;

/// Errors a delivery call can answer with.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("undecodable weather payload: {0}")]
    Decode(#[source] serde_json::Error),
}

impl IntoResponse for DeliveryError {
    fn into_response(self) -> Response {
        match self {
            DeliveryError::Decode(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()).into_response()
            }
        }
    }
}

/// Start the subscriber's HTTP server on the given port.
///
/// Shuts down gracefully once `shutdown` resolves. When `port` is 0,
/// the OS assigns an ephemeral port; the bound port is always logged.
pub async fn serve(
    store: SharedStore,
    port: u16,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(store);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();
    info!(port = actual_port, "subscriber listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Build the axum router (separated for testing).
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route(WEATHER_ROUTE, post(deliver_weather))
        .route("/weatherforecast", get(get_forecasts))
        .route("/dapr/subscribe", get(list_subscriptions))
        .route("/healthz", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

// ============================================================================
// Handlers
// ============================================================================

/// Delivery webhook for the `weather` topic.
///
/// Accepts one forecast, an ordered sequence of forecasts, or either
/// wrapped in the sidecar's event envelope, and replaces the store's
/// whole contents with the normalized sequence.
async fn deliver_weather(
    State(store): State<SharedStore>,
    Json(body): Json<serde_json::Value>,
) -> Result<StatusCode, DeliveryError> {
    let batch = envelope::normalize(body).map_err(|e| {
        warn!(error = %e, "rejected undecodable weather delivery");
        DeliveryError::Decode(e)
    })?;

    info!(count = batch.len(), "weather delivery received");
    store.replace(batch).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Current store contents; `[]` until the first delivery.
async fn get_forecasts(State(store): State<SharedStore>) -> Json<Vec<WeatherForecast>> {
    Json(store.snapshot().await.as_ref().clone())
}

/// Subscription table the sidecar queries at startup.
async fn list_subscriptions() -> Json<&'static [Subscription]> {
    Json(SUBSCRIPTIONS)
}

async fn health() -> StatusCode {
    StatusCode::OK
}
