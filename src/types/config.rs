//! Configuration structures.
//!
//! Configuration is deserializable from any serde source; embedders typically
//! build it from environment variables. All durations accept humantime
//! strings (`"1s"`, `"500ms"`).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Queue group shared by every proxy in the fleet for `create`-class
/// requests. One member of the group receives each message.
pub const QUEUE_GROUP: &str = "ariproxy";

/// Proxy server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Prefix prepended to every bus subject.
    pub prefix: String,

    /// Period between presence announcements.
    #[serde(with = "humantime_serde")]
    pub announce_interval: Duration,

    /// Period between Asterisk entity-id checks.
    #[serde(with = "humantime_serde")]
    pub identity_check_interval: Duration,

    /// Grace window for subscription teardown at shutdown. Exceeding it is a
    /// programmer error and aborts the process.
    #[serde(with = "humantime_serde")]
    pub shutdown_grace: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: "ari.".to_string(),
            announce_interval: Duration::from_secs(1),
            identity_check_interval: Duration::from_secs(60),
            shutdown_grace: Duration::from_millis(500),
        }
    }
}
