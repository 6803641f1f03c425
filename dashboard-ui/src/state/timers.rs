//! Browser Timer Host
//!
//! Schedules controller timers with `gloo-timers`. A fired timer is routed
//! back through [`DashboardState::on_timer`].

use gloo_timers::callback::Timeout;
use std::time::Duration;
use storefront_dashboard::{TimerHost, TimerKind};

use super::global::DashboardState;

/// `setTimeout`-backed timer host. Handles are the browser's timeout ids.
pub struct BrowserTimers {
    state: DashboardState,
}

impl BrowserTimers {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }
}

impl TimerHost for BrowserTimers {
    type Handle = i32;

    fn schedule(&mut self, kind: TimerKind, delay: Duration) -> i32 {
        let state = self.state;
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);

        // The controller keeps the id and cancels through the window
        let id = Timeout::new(millis, move || state.on_timer(kind)).forget();
        id.as_f64().map(|id| id as i32).unwrap_or_default()
    }

    fn cancel(&mut self, handle: i32) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(handle);
        }
    }
}
