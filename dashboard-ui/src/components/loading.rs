//! Loading Component
//!
//! Spinners and skeletons shown until the first poll cycle lands.

use leptos::*;

/// Block spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="loading-state">
            <div class="loading-spinner" />
        </div>
    }
}

/// Inline spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="loading-spinner loading-spinner-sm" />
    }
}

/// Placeholder for a stat card
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="stat-card skeleton">
            <div class="skeleton-line skeleton-short" />
            <div class="skeleton-line skeleton-wide" />
        </div>
    }
}
