//! Metric Card Component
//!
//! The four stat cards at the top of the dashboard.

use leptos::*;

use crate::components::loading::CardSkeleton;
use crate::state::use_dashboard;

/// Card icons, in card order
const ICONS: [&str; 4] = [
    "fas fa-peso-sign",
    "fas fa-shopping-bag",
    "fas fa-clock",
    "fas fa-exclamation-triangle",
];

/// Stat card row
#[component]
pub fn MetricCards() -> impl IntoView {
    let state = use_dashboard();

    view! {
        <div class="stats-grid">
            {move || match state.view.with(|view| view.cards.clone()) {
                Some(cards) => cards
                    .entries()
                    .into_iter()
                    .zip(ICONS)
                    .map(|((title, value), icon)| view! {
                        <MetricCard title=title value=value.to_string() icon=icon />
                    })
                    .collect_view(),
                None => (0..4).map(|_| view! { <CardSkeleton /> }).collect_view(),
            }}
        </div>
    }
}

/// One stat card
#[component]
pub fn MetricCard(
    /// Card heading
    title: &'static str,
    /// Formatted value
    #[prop(into)]
    value: String,
    /// Icon class
    icon: &'static str,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-icon">
                <i class=icon></i>
            </div>
            <div class="stat-content">
                <span class="stat-title">{title}</span>
                <span class="stat-value">{value}</span>
            </div>
        </div>
    }
}
