//! Core types for the proxy server.
//!
//! This module provides foundational types used throughout the system:
//! - **Errors**: Application error types with thiserror derives and the
//!   wire error-code mapping
//! - **Config**: Subject prefix and periodic-task intervals

mod config;
mod errors;

pub use config::{Config, QUEUE_GROUP};
pub use errors::{Error, ErrorCode, Result};
