//! Static subscription registration.
//!
//! The sidecar discovers where to deliver at startup by asking the
//! subscriber for its subscription table. The table is a compile-time
//! constant consulted by the discovery endpoint; there is no dynamic
//! add/remove. Its names must byte-for-byte match what the publisher
//! passes to `PubSubTransport::publish`, so both sides share these
//! constants.

use serde::Serialize;

/// Pub/sub component name shared by publisher and subscriber.
pub const PUBSUB_NAME: &str = "pubsub";
/// Topic the publisher emits to and the subscriber is bound to.
pub const WEATHER_TOPIC: &str = "weather";
/// Route the sidecar delivers `WEATHER_TOPIC` messages to.
pub const WEATHER_ROUTE: &str = "/weather";

/// One topic-to-route binding, in the shape the sidecar's discovery
/// call expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub pubsubname: &'static str,
    pub topic: &'static str,
    pub route: &'static str,
}

/// Every binding this subscriber registers.
pub const SUBSCRIPTIONS: &[Subscription] = &[Subscription {
    pubsubname: PUBSUB_NAME,
    topic: WEATHER_TOPIC,
    route: WEATHER_ROUTE,
}];
