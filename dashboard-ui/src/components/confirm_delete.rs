//! Delete Confirmation
//!
//! Server-rendered delete links and buttons carry `data-confirm-delete`.
//! One window-level click listener asks before letting them through.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

/// Elements whose clicks need confirmation
pub const CONFIRM_DELETE_SELECTOR: &str = "[data-confirm-delete]";

pub const CONFIRM_DELETE_MESSAGE: &str = "Are you sure you want to delete this item?";

/// Whether a click should be cancelled. `confirm` is only asked for
/// guarded clicks.
fn blocks_click(guarded: bool, confirm: impl FnOnce() -> bool) -> bool {
    guarded && !confirm()
}

fn ask() -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(CONFIRM_DELETE_MESSAGE).ok())
        .unwrap_or(true)
}

/// Installs the delegated click listener for the lifetime of the app
#[component]
pub fn ConfirmDeleteGuard() -> impl IntoView {
    let handle = window_event_listener(ev::click, move |event| {
        let guarded = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element.closest(CONFIRM_DELETE_SELECTOR).ok().flatten())
            .is_some();

        if blocks_click(guarded, ask) {
            event.prevent_default();
        }
    });
    on_cleanup(move || handle.remove());
}
