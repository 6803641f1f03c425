//! Storefront Admin Dashboard
//!
//! Browser front end of the storefront admin, built with Leptos (WASM).
//!
//! # Features
//!
//! - Collapsible sidebar with a mobile overlay
//! - Metric cards, sales charts and order/product tables refreshed every
//!   five minutes, on demand and when the date range changes
//! - Low-stock toast and auto-dismissing flash alerts
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All dashboard state lives in a
//! [`storefront_dashboard::DashboardController`]; components only mirror
//! its view into signals.

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
