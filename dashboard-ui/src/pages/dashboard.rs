//! Dashboard Page
//!
//! Stat cards, the two sales charts and the order/product tables.

use leptos::*;
use storefront_dashboard::CanvasId;

use crate::components::{ChartPanel, MetricCards, RecentOrdersTable, TopProductsTable};
use crate::state::use_dashboard;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_dashboard();

    view! {
        <div class="dashboard-content">
            <MetricCards />

            <div class="charts-grid">
                <ChartPanel title="Sales Overview" canvas=CanvasId::Sales />
                <ChartPanel title="Sales by Category" canvas=CanvasId::Category />
            </div>

            <div class="tables-grid">
                <RecentOrdersTable />
                <TopProductsTable />
            </div>

            {move || state.view.with(|view| view.inventory).map(|inventory| view! {
                <p class="inventory-summary">
                    {format!(
                        "{} products in catalog, {} low on stock",
                        inventory.total_products, inventory.low_stock_items
                    )}
                </p>
            })}
        </div>
    }
}
