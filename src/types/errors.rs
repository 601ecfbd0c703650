//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. Each
//! variant maps onto a wire error code via [`Error::code`]; the code is what
//! clients see in an error response envelope.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Wire-level error code carried in response envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    NotImplemented,
    BadRequest,
    Transport,
    NotFound,
    SwitchError,
    Internal,
}

/// Main error enum for the proxy server.
#[derive(Error, Debug)]
pub enum Error {
    /// Startup failures: ARI connect, bus connect, empty node id. Fatal;
    /// returned from `listen` and never sent on the wire.
    #[error("startup error: {0}")]
    Startup(String),

    /// ARI connection is down at request time.
    #[error("transport error: {0}")]
    Transport(String),

    /// Malformed payload for a request kind.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unknown request kind.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Entity does not exist on this Asterisk node.
    #[error("not found: {0}")]
    NotFound(String),

    /// An ARI call returned failure.
    #[error("asterisk error: {0}")]
    Switch(String),

    /// A bus publish failed. Logged at warn and dropped; never retried.
    #[error("publish error: {0}")]
    Publish(String),

    /// Internal errors.
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Convert to the wire error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Transport(_) => ErrorCode::Transport,
            Error::BadRequest(_) => ErrorCode::BadRequest,
            Error::NotImplemented(_) => ErrorCode::NotImplemented,
            Error::NotFound(_) => ErrorCode::NotFound,
            Error::Switch(_) => ErrorCode::SwitchError,
            Error::Startup(_)
            | Error::Publish(_)
            | Error::Internal(_)
            | Error::Serialization(_)
            | Error::Io(_) => ErrorCode::Internal,
        }
    }
}

// Convenience constructors
impl Error {
    pub fn startup(msg: impl Into<String>) -> Self {
        Self::Startup(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::NotImplemented(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn switch(msg: impl Into<String>) -> Self {
        Self::Switch(msg.into())
    }

    pub fn publish(msg: impl Into<String>) -> Self {
        Self::Publish(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
