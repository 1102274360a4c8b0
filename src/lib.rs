//! Weathervane - sidecar-style weather pub/sub pair.
//!
//! Two independent processes exchange weather observations through an
//! external pub/sub sidecar (the transport):
//!
//! - `weathervane-publisher` emits one randomized observation per
//!   interval to the `weather` topic.
//! - `weathervane-subscriber` serves the webhook the sidecar delivers
//!   to, holding the latest batch in memory for queries.

pub mod config;
pub mod forecast;
pub mod publisher;
pub mod store;
pub mod subscriber;
pub mod subscription;
pub mod transport;
pub mod utils;
