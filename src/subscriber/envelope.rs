//! Delivery payload normalization.
//!
//! Depending on sidecar configuration a delivery body arrives as the
//! bare payload or wrapped in a CloudEvents-style envelope. The payload
//! itself may be a single forecast or an ordered sequence. Every
//! accepted shape normalizes to a sequence before it reaches the store;
//! a single forecast becomes a one-element batch.

use serde::Deserialize;

use crate::forecast::WeatherForecast;

/// Payload as carried on the wire: one forecast or a sequence.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Batch(Vec<WeatherForecast>),
    Single(WeatherForecast),
}

impl Payload {
    fn into_batch(self) -> Vec<WeatherForecast> {
        match self {
            Payload::Batch(batch) => batch,
            Payload::Single(forecast) => vec![forecast],
        }
    }
}

/// CloudEvents-style envelope the sidecar wraps deliveries in.
///
/// Only the fields needed to recognize the envelope and extract its
/// payload are modeled; remaining metadata is ignored.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[allow(dead_code)]
    specversion: String,
    #[allow(dead_code)]
    id: String,
    #[allow(dead_code)]
    source: String,
    data: Payload,
}

/// A delivery body: enveloped or bare.
///
/// Envelope first: a bare forecast can never carry `specversion`, and
/// an envelope never decodes as a forecast, so the order is unambiguous.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeliveryBody {
    Enveloped(Envelope),
    Bare(Payload),
}

/// Normalize a delivery body to the batch it carries.
pub fn normalize(body: serde_json::Value) -> Result<Vec<WeatherForecast>, serde_json::Error> {
    let body: DeliveryBody = serde_json::from_value(body)?;
    let payload = match body {
        DeliveryBody::Enveloped(envelope) => envelope.data,
        DeliveryBody::Bare(payload) => payload,
    };
    Ok(payload.into_batch())
}
