//! Event envelope for the ARI event stream.
//!
//! Events pass through the proxy unmodified except for the `dialog` stamp
//! applied during per-dialog fan-out. The envelope keeps the raw body as
//! JSON and exposes only the pieces the proxy routes on: the event type and
//! the entities the event references.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The kinds of entity an event can reference and a dialog can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Channel,
    Bridge,
    Recording,
    Playback,
    DeviceState,
    Mailbox,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Channel => "channel",
            EntityKind::Bridge => "bridge",
            EntityKind::Recording => "recording",
            EntityKind::Playback => "playback",
            EntityKind::DeviceState => "deviceState",
            EntityKind::Mailbox => "mailbox",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One event received from the Asterisk event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event type, e.g. `ChannelHangupRequest`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Dialog stamp, set only on the per-dialog fan-out copies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog: Option<String>,

    /// Remaining event body, passed through verbatim.
    #[serde(flatten)]
    pub body: Value,
}

impl Event {
    pub fn new(kind: impl Into<String>, body: Value) -> Self {
        Self {
            kind: kind.into(),
            dialog: None,
            body,
        }
    }

    /// Event type.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Stamp the event with a dialog id.
    pub fn set_dialog(&mut self, dialog: impl Into<String>) {
        self.dialog = Some(dialog.into());
    }

    /// All `(kind, id)` entity references carried by this event.
    ///
    /// Returns an empty vec for events that reference no known entity.
    pub fn entity_refs(&self) -> Vec<(EntityKind, String)> {
        let mut refs = Vec::new();

        let mut push = |kind: EntityKind, key: &str, field: &str| {
            if let Some(id) = self
                .body
                .get(key)
                .and_then(|e| e.get(field))
                .and_then(Value::as_str)
            {
                refs.push((kind, id.to_string()));
            }
        };

        push(EntityKind::Channel, "channel", "id");
        // Dial-family events carry the far side as "peer".
        push(EntityKind::Channel, "peer", "id");
        push(EntityKind::Bridge, "bridge", "id");
        push(EntityKind::Playback, "playback", "id");
        push(EntityKind::Recording, "recording", "name");
        push(EntityKind::DeviceState, "device_state", "name");
        push(EntityKind::Mailbox, "mailbox", "name");

        refs
    }
}
