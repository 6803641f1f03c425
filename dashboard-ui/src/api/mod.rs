//! API Access

pub mod client;

pub use client::{adopt_server_alerts, embedded_flash_messages, get_api_base, GlooSource};
