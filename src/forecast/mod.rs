//! Weather observation model and factory.
//!
//! This module contains:
//! - `WeatherForecast`: the event exchanged between publisher and subscriber
//! - `Summary`: the fixed ten-label severity scale
//! - `WeatherFactory`: produces randomized-but-bounded observations
//!
//! Forecasts are write-once: `summary` is fixed alongside `temperature_c`
//! at creation and no field is mutated afterward.

use chrono::{NaiveDate, Utc};
use rand::Rng;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Lowest temperature the factory generates, in degrees Celsius.
pub const TEMPERATURE_MIN_C: i32 = -20;
/// Highest temperature the factory generates, in degrees Celsius.
pub const TEMPERATURE_MAX_C: i32 = 55;

// ============================================================================
// Severity scale
// ============================================================================

/// Severity label for an observation, ordered coldest to hottest.
///
/// Serialized as the bare label string (`"Freezing"` .. `"Scorching"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Summary {
    Freezing,
    Bracing,
    Chilly,
    Cool,
    Mild,
    Warm,
    Balmy,
    Hot,
    Sweltering,
    Scorching,
}

impl Summary {
    /// All labels, coldest first.
    pub const ALL: [Summary; 10] = [
        Summary::Freezing,
        Summary::Bracing,
        Summary::Chilly,
        Summary::Cool,
        Summary::Mild,
        Summary::Warm,
        Summary::Balmy,
        Summary::Hot,
        Summary::Sweltering,
        Summary::Scorching,
    ];
}

/// Map a temperature to its severity label.
///
/// Scales `[TEMPERATURE_MIN_C, TEMPERATURE_MAX_C]` linearly onto the ten
/// labels, so the mapping is total, monotone in temperature, and stable
/// across calls. Out-of-range inputs clamp to the nearest end of the scale.
pub fn summary_for(temperature_c: i32) -> Summary {
    let clamped = temperature_c.clamp(TEMPERATURE_MIN_C, TEMPERATURE_MAX_C);
    let span = TEMPERATURE_MAX_C - TEMPERATURE_MIN_C;
    let index = (clamped - TEMPERATURE_MIN_C) * (Summary::ALL.len() as i32 - 1) / span;
    Summary::ALL[index as usize]
}

// ============================================================================
// Event model
// ============================================================================

/// A point-in-time weather observation.
///
/// `temperature_f` is derived from `temperature_c` on access and emitted
/// during serialization; it is never stored, so the two can not drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Observed temperature in degrees Celsius.
    pub temperature_c: i32,
    /// Severity label, fixed alongside `temperature_c` at creation.
    pub summary: Summary,
}

impl WeatherForecast {
    /// Create an observation, deriving the summary from the temperature.
    pub fn new(date: NaiveDate, temperature_c: i32) -> Self {
        Self {
            date,
            temperature_c,
            summary: summary_for(temperature_c),
        }
    }

    /// Temperature in degrees Fahrenheit, rounded to the nearest integer.
    pub fn temperature_f(&self) -> i32 {
        (32.0 + self.temperature_c as f64 / 0.5556).round() as i32
    }
}

impl Serialize for WeatherForecast {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("WeatherForecast", 4)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("temperatureC", &self.temperature_c)?;
        state.serialize_field("temperatureF", &self.temperature_f())?;
        state.serialize_field("summary", &self.summary)?;
        state.end()
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Produces one observation per call with bounded random values.
///
/// Never fails and has no side effects beyond consuming randomness.
#[derive(Debug, Default)]
pub struct WeatherFactory;

impl WeatherFactory {
    /// Create a new factory.
    pub fn new() -> Self {
        Self
    }

    /// Produce today's observation with a temperature drawn uniformly
    /// from the generated range.
    pub fn create_weather(&self) -> WeatherForecast {
        let temperature_c = rand::rng().random_range(TEMPERATURE_MIN_C..=TEMPERATURE_MAX_C);
        WeatherForecast::new(Utc::now().date_naive(), temperature_c)
    }
}
