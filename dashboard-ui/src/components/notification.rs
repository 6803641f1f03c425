//! Low-Stock Notification
//!
//! Fixed-position toast listing products that are running out. Its CSS
//! class follows the notifier phase so the stylesheet can animate entry
//! and exit.

use leptos::*;

use crate::state::use_dashboard;

/// Positioning and phase transitions of the toast
pub const NOTIFICATION_STYLES: &str = r#"
.low-stock-notification {
    position: fixed;
    bottom: 20px;
    right: 20px;
    width: 320px;
    background-color: white;
    border-radius: 8px;
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
    z-index: 10000;
    transform: translateY(100%);
    opacity: 0;
    transition: transform 0.3s ease, opacity 0.3s ease;
    overflow: hidden;
}

.notification-visible {
    transform: translateY(0);
    opacity: 1;
}

.notification-hiding {
    transform: translateY(10px);
    opacity: 0;
}

.notification-header {
    display: flex;
    align-items: center;
    padding: 12px 15px;
    background-color: #f97316;
    color: white;
    font-weight: 600;
}

.notification-header i {
    margin-right: 8px;
}

.notification-header .close-notification {
    margin-left: auto;
    background: none;
    border: none;
    color: white;
    cursor: pointer;
    padding: 0;
    font-size: 14px;
}

.notification-body {
    padding: 15px;
}

.notification-body p {
    margin-top: 0;
    margin-bottom: 10px;
    color: #334155;
}

.low-stock-list {
    list-style: none;
    padding: 0;
    margin: 0 0 15px 0;
}

.low-stock-list li {
    padding: 8px 0;
    border-bottom: 1px solid #e2e8f0;
    display: flex;
    justify-content: space-between;
    font-size: 0.875rem;
}

.low-stock-list li:last-child {
    border-bottom: none;
}

.product-name {
    color: #334155;
    font-weight: 500;
}

.product-stock {
    color: #ef4444;
    font-weight: 600;
}

.more-items {
    text-align: center;
    color: #64748b;
    font-style: italic;
}

.view-all-btn {
    display: block;
    text-align: center;
    padding: 8px;
    background-color: #f1f5f9;
    color: #0f172a;
    border-radius: 4px;
    text-decoration: none;
    transition: background-color 0.2s ease;
    font-weight: 500;
}

.view-all-btn:hover {
    background-color: #e2e8f0;
}
"#;

/// Low-stock toast, rendered while the notifier holds one
#[component]
pub fn LowStockNotification() -> impl IntoView {
    let state = use_dashboard();

    // Content changes per toast, the class per phase
    let toast = create_memo(move |_| {
        state
            .notification
            .with(|n| n.as_ref().map(|snapshot| snapshot.toast.clone()))
    });
    let class = move || {
        state
            .notification
            .with(|n| n.as_ref().map(|snapshot| snapshot.phase.css_class()))
            .unwrap_or_default()
    };

    let toast_view = move || {
        toast.get().map(|toast| {
            let overflow = toast.overflow_label();

            view! {
                <div id="lowStockNotification" class=class>
                    <div class="notification-header">
                        <i class="fas fa-exclamation-triangle"></i>
                        <span>"Low Stock Alert"</span>
                        <button
                            class="close-notification"
                            on:click=move |_| state.dismiss_notification()
                        >
                            <i class="fas fa-times"></i>
                        </button>
                    </div>
                    <div class="notification-body">
                        <p>
                            "You have " <strong>{toast.count}</strong> " products with low stock."
                        </p>
                        <ul class="low-stock-list">
                            {toast
                                .items
                                .into_iter()
                                .map(|item| view! {
                                    <li>
                                        <span class="product-name">{item.name}</span>
                                        <span class="product-stock">{format!("Stock: {}", item.stock)}</span>
                                    </li>
                                })
                                .collect_view()}
                            {overflow.map(|label| view! { <li class="more-items">{label}</li> })}
                        </ul>
                        <a href=toast.view_all_href class="view-all-btn">"View All"</a>
                    </div>
                </div>
            }
        })
    };

    view! {
        <style>{NOTIFICATION_STYLES}</style>
        {toast_view}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_dashboard::NotifierPhase;

    #[test]
    fn test_every_phase_class_is_styled() {
        for phase in [
            NotifierPhase::Entering,
            NotifierPhase::Visible,
            NotifierPhase::Hiding,
        ] {
            for class in phase.css_class().split_whitespace() {
                assert!(
                    NOTIFICATION_STYLES.contains(&format!(".{} {{", class)),
                    "no rule for {}",
                    class
                );
            }
        }
    }
}
