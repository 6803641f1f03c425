//! UI Components
//!
//! Leptos components of the admin shell and the dashboard page.

pub mod chart;
pub mod confirm_delete;
pub mod header;
pub mod loading;
pub mod metric_card;
pub mod notification;
pub mod sidebar;
pub mod tables;
pub mod toast;

pub use chart::ChartPanel;
pub use confirm_delete::ConfirmDeleteGuard;
pub use header::Header;
pub use metric_card::MetricCards;
pub use notification::LowStockNotification;
pub use sidebar::{Sidebar, SidebarOverlay};
pub use tables::{RecentOrdersTable, TopProductsTable};
pub use toast::FlashAlerts;
