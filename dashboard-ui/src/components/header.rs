//! Header Component
//!
//! Top bar with the sidebar toggles, the refresh button, the date range
//! filter, the "Last updated" label and the user menu.

use leptos::*;
use storefront_dashboard::PollTrigger;

use crate::components::loading::InlineLoading;
use crate::state::use_dashboard;

/// Date range filter options (value, label)
const DATE_RANGES: [(&str, &str); 4] = [
    ("today", "Today"),
    ("week", "This Week"),
    ("month", "This Month"),
    ("year", "This Year"),
];

/// Header bar
#[component]
pub fn Header() -> impl IntoView {
    let state = use_dashboard();

    view! {
        <header class="admin-header">
            <div class="header-left">
                <button
                    id="sidebarToggle"
                    class="sidebar-toggle"
                    on:click=move |_| state.shell.update(|shell| shell.toggle_sidebar())
                >
                    <i class="fas fa-bars"></i>
                </button>
                <button
                    id="mobileMenuToggle"
                    class="mobile-menu-toggle"
                    on:click=move |_| state.shell.update(|shell| shell.toggle_mobile_menu())
                >
                    <i class="fas fa-bars"></i>
                </button>
                <h1 class="page-title">"Dashboard"</h1>
            </div>

            <div class="header-right">
                <span id="lastUpdated" class="last-updated">
                    {move || state.view.with(|view| view.last_updated.clone())}
                </span>

                <select
                    id="dateRangeFilter"
                    class="form-select"
                    on:change=move |ev| state.select_date_range(event_target_value(&ev))
                    prop:value=move || state.date_range.get()
                >
                    {DATE_RANGES
                        .iter()
                        .map(|&(value, label)| view! { <option value=value>{label}</option> })
                        .collect_view()}
                </select>

                <button
                    id="refreshDashboard"
                    class="btn btn-primary"
                    on:click=move |_| state.refresh(PollTrigger::Manual)
                >
                    {move || {
                        if state.loading.get() {
                            view! { <InlineLoading /> }.into_view()
                        } else {
                            view! { <i class="fas fa-sync-alt"></i> }.into_view()
                        }
                    }}
                    " Refresh"
                </button>

                <UserMenu />
            </div>
        </header>
    }
}

/// User dropdown, opened while hovered
#[component]
fn UserMenu() -> impl IntoView {
    let state = use_dashboard();

    view! {
        <div
            class=move || {
                if state.dropdown.get().active {
                    "dropdown active"
                } else {
                    "dropdown"
                }
            }
            on:mouseenter=move |_| state.dropdown.update(|d| d.pointer_enter())
            on:mouseleave=move |_| state.dropdown.update(|d| d.pointer_leave())
        >
            <button class="dropdown-toggle">
                <i class="fas fa-user-circle"></i>
                " Admin"
            </button>
            <div class="dropdown-menu">
                <a href="/accounts/profile/" class="dropdown-item">"Profile"</a>
                <a href="/" class="dropdown-item">"View Store"</a>
                <a href="/accounts/logout/" class="dropdown-item">"Logout"</a>
            </div>
        </div>
    }
}
