//! State Management
//!
//! Global dashboard state and the browser timer host.

pub mod global;
pub mod timers;

pub use global::{provide_dashboard_state, use_dashboard};
