//! EcoWatcher Dashboard
//!
//! Browser frontend for the EcoWatcher eco-score monitor, built with Leptos
//! (WASM).
//!
//! # Features
//!
//! - Latest eco-score card with severity, trend and critical alert
//! - History chart refreshed every minute
//! - Score band reference table in a modal dialog
//! - Tabbed panels with a staged fade transition
//! - Sign-up form password confirmation
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The polling, classification and transition logic lives in the
//! `ecowatcher` core crate; this crate binds it to signals, the canvas and the
//! backend over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
