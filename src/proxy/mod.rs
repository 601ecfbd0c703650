//! Wire envelopes for bus RPC.
//!
//! A request names an operation kind and carries an opaque payload; the
//! reply subject arrives out-of-band from the bus delivery, never inside the
//! envelope. A response carries exactly one of a value or an error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Error, ErrorCode};

pub mod payloads;

/// Addressing and dialog context attached to a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub application: String,
    #[serde(default)]
    pub node: String,
    #[serde(default)]
    pub dialog: String,
}

/// An RPC request received from the bus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Operation kind, e.g. `ChannelGet`.
    pub kind: String,

    #[serde(default)]
    pub metadata: Metadata,

    /// Operation payload; decoded per kind via [`Request::payload_as`].
    #[serde(default)]
    pub payload: Value,
}

impl Request {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            metadata: Metadata::default(),
            payload,
        }
    }

    /// Decode the payload into the kind's transport struct. Failures map to
    /// a *bad-request* error.
    pub fn payload_as<T: DeserializeOwned>(&self) -> crate::types::Result<T> {
        serde_json::from_value(self.payload.clone())
            .map_err(|e| Error::bad_request(format!("invalid {} payload: {e}", self.kind)))
    }
}

/// Error envelope inside a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: ErrorCode,
    pub message: String,
}

/// An RPC response published on the reply subject. Exactly one of `value`
/// and `error` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
}

impl Response {
    /// A successful response carrying `value`.
    pub fn value(value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Self {
                value: Some(v),
                error: None,
            },
            Err(e) => Self::error(&Error::Serialization(e)),
        }
    }

    /// An empty acknowledgement for no-reply command kinds.
    pub fn empty() -> Self {
        Self {
            value: Some(Value::Object(Default::default())),
            error: None,
        }
    }

    /// An error response.
    pub fn error(err: &Error) -> Self {
        Self {
            value: None,
            error: Some(ErrorEnvelope {
                code: err.code(),
                message: err.to_string(),
            }),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Presence announcement published on the announce subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    /// Asterisk entity id of the node this proxy fronts.
    pub node: String,
    /// ARI application this proxy owns.
    pub application: String,
}

/// A handle to an entity, returned by `*Get`, `*List` and `*Stage*` kinds.
/// Stage handles are allocated locally and materialized later by the
/// non-stage counterpart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity kind, e.g. `channel`, `bridge`, `playback`.
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub node: String,
    #[serde(default)]
    pub application: String,
}

impl EntityRef {
    pub fn new(
        kind: impl Into<String>,
        id: impl Into<String>,
        node: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            node: node.into(),
            application: application.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_decode_defaults() {
        let r: Request = serde_json::from_value(json!({"kind": "ChannelList"})).unwrap();
        assert_eq!(r.kind, "ChannelList");
        assert_eq!(r.metadata, Metadata::default());
        assert_eq!(r.payload, Value::Null);
    }

    #[test]
    fn test_payload_as_maps_to_bad_request() {
        let r = Request::new("ChannelGet", json!({"wrong": true}));
        let err = r.payload_as::<payloads::Id>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);
    }

    #[test]
    fn test_response_exactly_one_side() {
        let ok = Response::value(json!({"id": "c-1"}));
        assert!(ok.value.is_some());
        assert!(ok.error.is_none());

        let err = Response::error(&Error::not_found("no such channel"));
        assert!(err.value.is_none());
        let env = err.error.unwrap();
        assert_eq!(env.code, ErrorCode::NotFound);
        assert!(env.message.contains("no such channel"));
    }

    #[test]
    fn test_empty_ack_round_trip() {
        let ack = Response::empty();
        let wire = serde_json::to_string(&ack).unwrap();
        let back: Response = serde_json::from_str(&wire).unwrap();
        assert!(back.value.is_some());
        assert!(!back.is_error());
    }

    #[test]
    fn test_announcement_wire_shape() {
        let a = Announcement {
            node: "ast1".into(),
            application: "voiceapp".into(),
        };
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            json!({"node": "ast1", "application": "voiceapp"})
        );
    }
}
