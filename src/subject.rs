//! Subject codec for the bus wire namespace.
//!
//! Subject layout:
//! ```text
//! <prefix><class>.<application>.<node>
//! ```
//! An empty `application` or `node` component serializes literally as an
//! empty string and acts as a wildcard at that position on the subscribe
//! side. Drivers that speak literal wildcard tokens substitute them via
//! [`Subject::wildcarded`]; the final exact match is always done in software
//! with [`Subject::matches`] because brokers differ in wildcard granularity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Request class for read operations.
pub const CLASS_GET: &str = "get";
/// Request class for metadata operations.
pub const CLASS_DATA: &str = "data";
/// Request class for mutating operations.
pub const CLASS_COMMAND: &str = "command";
/// Request class for create operations (queue-group delivery).
pub const CLASS_CREATE: &str = "create";

/// Wildcard literal understood by the software matcher as an any-address
/// marker, the token NATS-style drivers substitute for an empty position.
pub const WILDCARD: &str = "*";

/// A parsed or to-be-encoded bus subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    /// Common prefix for the proxy fleet, e.g. `"ari."`.
    pub prefix: String,
    /// Message class (`get`, `data`, `command`, `create`, ...).
    pub class: String,
    /// ARI application name; empty means any.
    pub app: String,
    /// Asterisk node id; empty means any.
    pub node: String,
}

impl Subject {
    pub fn new(
        prefix: impl Into<String>,
        class: impl Into<String>,
        app: impl Into<String>,
        node: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            class: class.into(),
            app: app.into(),
            node: node.into(),
        }
    }

    /// Encode to the literal wire form. Empty components stay empty.
    pub fn encode(&self) -> String {
        format!("{}{}.{}.{}", self.prefix, self.class, self.app, self.node)
    }

    /// Parse a literal three-component subject. Inverse of [`Subject::encode`]:
    /// `parse(prefix, s.encode()) == Some(s)` for any subject built with the
    /// same prefix.
    pub fn parse(prefix: &str, subject: &str) -> Option<Self> {
        let rest = subject.strip_prefix(prefix)?;
        let parts: Vec<&str> = rest.split('.').collect();
        if parts.len() != 3 {
            return None;
        }
        Some(Self::new(prefix, parts[0], parts[1], parts[2]))
    }

    /// Exact-match a delivered subject against this pattern.
    ///
    /// A non-empty pattern position requires the identical token. An empty
    /// pattern position accepts only the any-address markers (the empty
    /// token, or the wildcard literal a driver substitutes for one). The
    /// three subscription shapes of one class therefore stay disjoint and
    /// each request is dispatched at most once however the bus fans it out.
    pub fn matches(&self, subject: &str) -> bool {
        let Some(rest) = subject.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        let parts: Vec<&str> = rest.split('.').collect();
        if parts.len() != 3 {
            return false;
        }
        parts[0] == self.class
            && position_matches(&self.app, parts[1])
            && position_matches(&self.node, parts[2])
    }

    /// Encode with the driver's wildcard token substituted for empty
    /// positions, e.g. `wildcarded("*")` on `get..` yields `ari.get.*.*`.
    pub fn wildcarded(&self, token: &str) -> String {
        let app = if self.app.is_empty() { token } else { &self.app };
        let node = if self.node.is_empty() { token } else { &self.node };
        format!("{}{}.{}.{}", self.prefix, self.class, app, node)
    }
}

fn position_matches(pattern: &str, token: &str) -> bool {
    if pattern.is_empty() {
        token.is_empty() || token == WILDCARD
    } else {
        token == pattern
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// Subject on which presence announcements are published.
pub fn announce(prefix: &str) -> String {
    format!("{prefix}announce")
}

/// Subject on which presence pings are received.
pub fn ping(prefix: &str) -> String {
    format!("{prefix}ping")
}

/// Canonical subject for events of one application/node pair.
pub fn event(prefix: &str, app: &str, node: &str) -> String {
    format!("{prefix}event.{app}.{node}")
}

/// Per-dialog event subject.
pub fn dialog_event(prefix: &str, dialog: &str) -> String {
    format!("{prefix}dialogevent.{dialog}")
}
