//! App Root Component
//!
//! Admin shell around the dashboard page, plus the global providers.

use leptos::*;

use crate::components::{
    ConfirmDeleteGuard, FlashAlerts, Header, LowStockNotification, Sidebar, SidebarOverlay,
};
use crate::pages::Dashboard;
use crate::state::provide_dashboard_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    let state = provide_dashboard_state();

    // Canvases must be in the document before the first cycle lands
    create_effect(move |started: Option<()>| {
        if started.is_none() {
            state.start();
        }
    });
    on_cleanup(move || state.teardown());

    view! {
        <div class="admin-layout">
            <Sidebar />
            <SidebarOverlay />

            <div class="admin-main">
                <Header />
                <FlashAlerts />

                <main class="admin-content">
                    <Dashboard />
                </main>
            </div>

            <LowStockNotification />
            <ConfirmDeleteGuard />
        </div>
    }
}
