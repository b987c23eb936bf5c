//! API Layer
//!
//! HTTP client functions for the Metroboard REST API.

pub mod client;

pub use client::{fetch_lines, fetch_stations};
