//! # ari-proxy - Asterisk REST Interface proxy server
//!
//! Bridges one ARI application on one Asterisk node to a subject-based
//! message-bus cluster:
//! - Presence announcements and ping replies, so clients can discover nodes
//! - Addressed RPC requests dispatched across the full ARI operation set
//! - The Asterisk event stream fanned out on canonical and per-dialog
//!   subjects, driven by the dialog binding table
//! - Fail-fast identity checking and bounded-grace shutdown
//!
//! ## Architecture
//!
//! ```text
//!               ┌───────────────────────────────────────┐
//!   bus req  →  │  Request Broker → dispatch → ARI call │ →  reply subject
//!               │                                       │
//!   ARI event → │  Event Pump ──┬─ event.<app>.<node>   │ →  bus
//!               │               └─ dialogevent.<dialog> │
//!               │        (Dialog Registry decides)      │
//!               │                                       │
//!   ticks    →  │  Announcer / Identity Checker         │
//!               └───────────────────────────────────────┘
//! ```
//!
//! A horizontally-scaled pool of these servers makes a fleet of Asterisk
//! nodes look like one addressable cluster; `create`-class requests use a
//! queue group so an unaddressed create lands on exactly one proxy.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod ari;
pub mod bus;
pub mod dialog;
pub mod proxy;
pub mod server;
pub mod subject;
pub mod types;

// Internal utilities
pub mod observability;

pub use server::Server;
pub use types::{Config, Error, Result};
