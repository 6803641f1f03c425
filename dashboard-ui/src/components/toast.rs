//! Flash Alerts
//!
//! Server-provided messages shown above the dashboard. Each closes itself
//! after a few seconds or when its close button is clicked.

use leptos::*;
use storefront_dashboard::FlashLevel;

use crate::state::use_dashboard;

fn level_icon(level: FlashLevel) -> &'static str {
    match level {
        FlashLevel::Success => "fas fa-check-circle",
        FlashLevel::Info => "fas fa-info-circle",
        FlashLevel::Warning => "fas fa-exclamation-circle",
        FlashLevel::Error => "fas fa-times-circle",
    }
}

/// Flash alert container
#[component]
pub fn FlashAlerts() -> impl IntoView {
    let state = use_dashboard();

    view! {
        <div class="alerts-container">
            <For
                each=move || state.flashes.get()
                key=|message| message.id
                children=move |message| {
                    let id = message.id;
                    view! {
                        <div class=message.level.css_class() role="alert">
                            <i class=level_icon(message.level)></i>
                            <span>{message.text}</span>
                            <button
                                class="alert-close"
                                on:click=move |_| state.dismiss_flash(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_icon() {
        assert_eq!(level_icon(FlashLevel::Error), "fas fa-times-circle");
    }
}
