//! Table Components
//!
//! Pending orders and best sellers. The core renders the `<tbody>` markup
//! with every server string escaped, so it is injected as is.

use leptos::*;
use storefront_dashboard::{TableBody, TableRow};

use crate::components::loading::Loading;
use crate::state::use_dashboard;

/// Markup of a table body, or `None` before the first render
fn body_html<R: TableRow>(body: Option<&TableBody<R>>) -> Option<String> {
    body.map(|body| body.to_html())
}

/// Pending orders table
#[component]
pub fn RecentOrdersTable() -> impl IntoView {
    let state = use_dashboard();
    let html = create_memo(move |_| state.view.with(|view| body_html(view.recent_orders.as_ref())));

    view! {
        <div class="table-card">
            <div class="table-header">
                <h3>"Recent Orders"</h3>
                <a href="/dashboard/orders/?status=pending" class="view-all">"View All"</a>
            </div>
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"Order ID"</th>
                        <th>"Customer"</th>
                        <th>"Amount"</th>
                        <th>"Status"</th>
                        <th>"Date"</th>
                    </tr>
                </thead>
                <tbody id="recentOrdersTable" inner_html=move || html.get().unwrap_or_default()></tbody>
            </table>
            {move || html.with(Option::is_none).then(|| view! { <Loading /> })}
        </div>
    }
}

/// Best sellers table
#[component]
pub fn TopProductsTable() -> impl IntoView {
    let state = use_dashboard();
    let html = create_memo(move |_| state.view.with(|view| body_html(view.top_products.as_ref())));

    view! {
        <div class="table-card">
            <div class="table-header">
                <h3>"Top Products"</h3>
                <a href="/dashboard/products/" class="view-all">"View All"</a>
            </div>
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"Product"</th>
                        <th>"Category"</th>
                        <th>"Sold"</th>
                        <th>"Revenue"</th>
                    </tr>
                </thead>
                <tbody id="topProductsTable" inner_html=move || html.get().unwrap_or_default()></tbody>
            </table>
            {move || html.with(Option::is_none).then(|| view! { <Loading /> })}
        </div>
    }
}
