//! Metroboard Dashboard
//!
//! Realtime Washington Metro arrival board built with Leptos (WASM).
//!
//! # Features
//!
//! - Live train arrival predictions over WebSocket
//! - Station and line data from the Metroboard API
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. At startup it derives the API and WebSocket endpoints from
//! the page location and mounts the root component with both as props.

use leptos::*;

mod api;
mod app;
mod components;
mod config;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Derive endpoints from the page location
    let endpoints = config::Endpoints::from_location().unwrap_or_default();

    // Mount the app to the document body
    mount_to_body(move || {
        view! {
            <app::App
                api_url=endpoints.api_url.clone()
                ws_url=endpoints.ws_url.clone()
            />
        }
    });
}
