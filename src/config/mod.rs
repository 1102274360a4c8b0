//! Process configuration.
//!
//! Both binaries are configured entirely through environment variables,
//! with working defaults for local development next to a sidecar on its
//! default port. A malformed value falls back to the default with a
//! warning rather than refusing to start.

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::publisher::DEFAULT_PUBLISH_INTERVAL;

/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "WEATHERVANE_LOG";
/// Environment variable for the sidecar's HTTP port.
pub const DAPR_HTTP_PORT_ENV_VAR: &str = "DAPR_HTTP_PORT";
/// Environment variable for the publish interval in seconds.
pub const PUBLISH_INTERVAL_ENV_VAR: &str = "PUBLISH_INTERVAL_SECS";
/// Environment variable for the subscriber's listen port.
pub const PORT_ENV_VAR: &str = "PORT";

/// Default sidecar HTTP port.
pub const DEFAULT_DAPR_HTTP_PORT: u16 = 3500;
/// Default subscriber listen port.
pub const DEFAULT_SUBSCRIBER_PORT: u16 = 5000;

/// Configuration for the publisher process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    /// HTTP port of the local sidecar publish API.
    pub dapr_http_port: u16,
    /// Pause between publishes.
    pub publish_interval: Duration,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            dapr_http_port: DEFAULT_DAPR_HTTP_PORT,
            publish_interval: DEFAULT_PUBLISH_INTERVAL,
        }
    }
}

impl PublisherConfig {
    /// Load from the environment, defaulting anything unset.
    pub fn from_env() -> Self {
        Self {
            dapr_http_port: env_or(DAPR_HTTP_PORT_ENV_VAR, DEFAULT_DAPR_HTTP_PORT),
            publish_interval: Duration::from_secs(env_or(
                PUBLISH_INTERVAL_ENV_VAR,
                DEFAULT_PUBLISH_INTERVAL.as_secs(),
            )),
        }
    }
}

/// Configuration for the subscriber process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberConfig {
    /// Port the HTTP surface listens on.
    pub port: u16,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SUBSCRIBER_PORT,
        }
    }
}

impl SubscriberConfig {
    /// Load from the environment, defaulting anything unset.
    pub fn from_env() -> Self {
        Self {
            port: env_or(PORT_ENV_VAR, DEFAULT_SUBSCRIBER_PORT),
        }
    }
}

/// Read and parse an environment variable, falling back to `default`.
fn env_or<T>(var: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match std::env::var(var) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(var = var, value = %raw, "unparseable value, using default");
            default
        }),
        Err(_) => default,
    }
}
