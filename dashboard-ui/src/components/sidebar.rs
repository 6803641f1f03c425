//! Sidebar Component
//!
//! Admin navigation sidebar and the overlay that covers the page while the
//! sidebar is open on small screens.

use leptos::*;

use crate::state::use_dashboard;

/// Sidebar menu entries (label, icon class, href)
const MENU: [(&str, &str, &str); 6] = [
    ("Dashboard", "fas fa-tachometer-alt", "/dashboard/"),
    ("Products", "fas fa-box", "/dashboard/products/"),
    ("Orders", "fas fa-shopping-cart", "/dashboard/orders/"),
    ("Customers", "fas fa-users", "/dashboard/customers/"),
    ("Categories", "fas fa-tags", "/dashboard/categories/"),
    ("Settings", "fas fa-cog", "/dashboard/settings/"),
];

fn active_class(base: &str, active: bool) -> String {
    if active {
        format!("{} active", base)
    } else {
        base.to_string()
    }
}

/// Navigation sidebar
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_dashboard();

    view! {
        <aside class=move || active_class("admin-sidebar", state.shell.get().sidebar_active)>
            <div class="sidebar-header">
                <a href="/dashboard/" class="sidebar-brand">"Storefront Admin"</a>
            </div>
            <nav class="sidebar-menu">
                {MENU
                    .iter()
                    .map(|&(label, icon, href)| view! {
                        <a
                            href=href
                            class="menu-item"
                            on:click=move |_| state.menu_item_clicked()
                        >
                            <i class=icon></i>
                            <span>{label}</span>
                        </a>
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}

/// Page overlay; clicking it closes the sidebar
#[component]
pub fn SidebarOverlay() -> impl IntoView {
    let state = use_dashboard();

    view! {
        <div
            id="sidebarOverlay"
            class=move || active_class("sidebar-overlay", state.shell.get().overlay_active)
            on:click=move |_| state.shell.update(|shell| shell.close_sidebar())
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_class() {
        assert_eq!(active_class("admin-sidebar", true), "admin-sidebar active");
        assert_eq!(active_class("sidebar-overlay", false), "sidebar-overlay");
    }
}
