//! WMATA Rail API
//!
//! Upstream client for the WMATA (Washington Metropolitan Area Transit
//! Authority) Rail API.
//!
//! ## Architecture
//!
//! - **RailApi**: trait over the upstream endpoints, so the poller and the
//!   API routes can run against a stub in tests
//! - **WmataClient**: reqwest-based implementation talking to api.wmata.com
//!
//! Responses are opaque JSON payloads: the server proxies and streams them
//! without interpreting their contents.

mod client;

pub use client::{RailApi, WmataClient, WmataError};
