//! # Storefront Dashboard
//!
//! Polling, rendering and notification core of the storefront admin
//! dashboard. The same core drives the browser dashboard (`dashboard-ui`)
//! and the terminal client shipped with the `native` feature.
//!
//! ## Features
//!
//! - **Failure-isolated polling**: six sections fetched concurrently and
//!   applied in completion order
//! - **Stale-response discarding**: per-section cycle sequence numbers
//! - **Single chart instance per canvas**: old instances are destroyed
//!   before a redraw
//! - **Low-stock toast**: one transient notification at a time
//!
//! ## Modules
//!
//! - [`controller`]: Dashboard state owner and poll cycle bookkeeping
//! - [`source`]: Data source trait and poll streams
//! - [`render`]: Section view models
//! - [`notifier`]: Low-stock toast lifecycle
//! - [`timers`]: Timer host abstraction
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use storefront_dashboard::client::HttpSource;
//! use storefront_dashboard::*;
//!
//! # struct Headless;
//! # impl ChartSurface for Headless {
//! #     type Instance = ();
//! #     fn has_canvas(&self, _: CanvasId) -> bool { true }
//! #     fn create(&mut self, _: CanvasId, _: &ChartSpec) -> Option<()> { Some(()) }
//! #     fn destroy(&mut self, _: ()) {}
//! # }
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DashboardConfig::load_default();
//!     let source = HttpSource::new(config.api.clone())?;
//!
//!     let mut timers = ManualTimers::new();
//!     let mut surface = Headless;
//!     let mut controller = DashboardController::new(config);
//!
//!     let cycle = controller.begin_cycle(PollTrigger::Manual, chrono::Local::now().time());
//!     let mut results = poll_sections(&source);
//!     while let Some((section, result)) = results.next().await {
//!         controller.apply(cycle, section, result, &mut surface, &mut timers);
//!     }
//!
//!     if let Some(cards) = &controller.view().cards {
//!         println!("Total sales: {}", cards.total_sales);
//!     }
//!     Ok(())
//! }
//! ```

pub mod charts;
#[cfg(feature = "native")]
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod flash;
pub mod format;
pub mod model;
pub mod notifier;
pub mod render;
pub mod shell;
pub mod source;
pub mod timers;

// Re-export top-level types for convenience
pub use charts::{CanvasId, ChartKind, ChartRegistry, ChartSpec, ChartSurface, Dataset};

pub use config::{
    AlertConfig, ApiConfig, ConfigError, DashboardConfig, LayoutConfig, LoggingConfig,
    NotificationConfig, PollingConfig,
};

pub use controller::{
    ApplyOutcome, CycleId, DashboardController, DashboardView, InventorySummary, PollTrigger,
    TimerOutcome,
};

pub use error::{DashboardError, DashboardResult};

pub use flash::{FlashBoard, FlashInput, FlashLevel, FlashMessage};

pub use model::{
    Amount, CategoryBreakdown, Envelope, LowStockProduct, Metrics, Payload, ProductsCheck,
    RecentOrder, SalesOverview, Section, TopProduct,
};

pub use notifier::{LowStockItem, LowStockNotifier, LowStockToast, NotifierPhase};

pub use render::{MetricCards, RecentOrderRow, TableBody, TableRow, TopProductRow};

pub use shell::{DropdownState, ShellState};

pub use source::{fetch_section, poll_sections, DashboardSource, PollStream};

pub use timers::{ManualTimers, TimerHost, TimerKind};
