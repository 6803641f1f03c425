//! Dashboard Controller
//!
//! Owns everything that outlives a single poll cycle: the chart instances,
//! the low-stock notifier, the flash board, the poll timer and the
//! per-section sequence numbers used to drop stale responses.
//!
//! The controller performs no I/O. Hosts fetch sections (see
//! [`crate::source::poll_sections`]) and feed each result to
//! [`DashboardController::apply`] as it arrives, and forward every fired
//! timer to [`DashboardController::on_timer`].

use chrono::NaiveTime;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::charts::{CanvasId, ChartRegistry, ChartSpec, ChartSurface};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::flash::{FlashBoard, FlashInput};
use crate::format;
use crate::model::{Payload, Section};
use crate::notifier::LowStockNotifier;
use crate::render::{self, MetricCards, RecentOrderRow, TableBody, TopProductRow};
use crate::timers::{TimerHost, TimerKind};

/// Sequence number of a poll cycle
pub type CycleId = u64;

/// What started a poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollTrigger {
    /// Page load
    Initial,
    /// Refresh button
    Manual,
    /// Date range filter changed
    DateRangeChanged,
    /// Poll timer fired
    Timer,
}

impl PollTrigger {
    /// Every trigger except the initial load refreshes "Last updated"
    pub fn refreshes_timestamp(&self) -> bool {
        !matches!(self, PollTrigger::Initial)
    }
}

/// Inventory totals from the last products check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub total_products: u64,
    pub low_stock_items: u64,
}

/// What the dashboard currently shows. `None` means the section has not
/// rendered yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: Option<MetricCards>,
    pub sales_chart: Option<ChartSpec>,
    pub category_chart: Option<ChartSpec>,
    pub recent_orders: Option<TableBody<RecentOrderRow>>,
    pub top_products: Option<TableBody<TopProductRow>>,
    pub inventory: Option<InventorySummary>,
    pub last_updated: Option<String>,
}

/// Result of feeding one section result to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// Section re-rendered
    Applied(Section),
    /// A newer cycle already rendered this section
    Stale { cycle: CycleId, newest: CycleId },
    /// Server reported `success: false`
    Skipped(DashboardError),
    /// Fetch or decode failed
    Failed(DashboardError),
}

/// Result of a fired timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Host should run a poll cycle with [`PollTrigger::Timer`]
    PollDue,
    /// Low-stock toast changed phase
    NotificationChanged,
    /// A flash message expired
    FlashExpired(u64),
    /// Timer no longer relevant
    Ignored,
}

/// Dashboard state owner
pub struct DashboardController<I, H> {
    config: DashboardConfig,
    charts: ChartRegistry<I>,
    notifier: LowStockNotifier<H>,
    flashes: FlashBoard<H>,
    poll_timer: Option<H>,
    started: bool,
    next_cycle: CycleId,
    in_flight: HashSet<CycleId>,
    applied: HashMap<Section, CycleId>,
    view: DashboardView,
}

impl<I, H> DashboardController<I, H> {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            charts: ChartRegistry::new(),
            notifier: LowStockNotifier::new(config.notifications.clone()),
            flashes: FlashBoard::new(Duration::from_millis(config.alerts.auto_dismiss_ms)),
            poll_timer: None,
            started: false,
            next_cycle: 1,
            in_flight: HashSet::new(),
            applied: HashMap::new(),
            view: DashboardView::default(),
            config,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn notifier(&self) -> &LowStockNotifier<H> {
        &self.notifier
    }

    pub fn flashes(&self) -> &FlashBoard<H> {
        &self.flashes
    }

    pub fn charts(&self) -> &ChartRegistry<I> {
        &self.charts
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether any opened cycle has not finished yet
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Arm the poll timer. Calling it again re-arms instead of stacking.
    pub fn start<T>(&mut self, timers: &mut T)
    where
        T: TimerHost<Handle = H>,
    {
        self.started = true;
        self.arm_poll(timers);
        tracing::debug!(
            interval_ms = self.config.polling.interval().as_millis() as u64,
            "Dashboard polling started"
        );
    }

    /// Open a new poll cycle and return its sequence number
    pub fn begin_cycle(&mut self, trigger: PollTrigger, now: NaiveTime) -> CycleId {
        let cycle = self.next_cycle;
        self.next_cycle += 1;

        if trigger.refreshes_timestamp() {
            self.view.last_updated = Some(format::last_updated_label(now));
        }

        self.in_flight.insert(cycle);
        tracing::info!(cycle, ?trigger, "Loading dashboard data");
        cycle
    }

    /// Mark a cycle as settled once every section has been applied.
    /// Overlapping cycles keep the dashboard loading until the last one ends.
    pub fn finish_cycle(&mut self, cycle: CycleId) {
        self.in_flight.remove(&cycle);
    }

    /// Apply one section's result from `cycle`
    pub fn apply<S, T>(
        &mut self,
        cycle: CycleId,
        section: Section,
        result: DashboardResult<Payload>,
        surface: &mut S,
        timers: &mut T,
    ) -> ApplyOutcome
    where
        S: ChartSurface<Instance = I>,
        T: TimerHost<Handle = H>,
    {
        let payload = match result {
            Ok(payload) => payload,
            Err(e) if e.is_logical() => {
                tracing::debug!(%section, cycle, "Section skipped: {}", e);
                return ApplyOutcome::Skipped(e);
            }
            Err(e) => {
                tracing::error!(%section, cycle, "Error loading {}: {}", section, e);
                return ApplyOutcome::Failed(e);
            }
        };

        if let Some(&newest) = self.applied.get(&section) {
            if newest > cycle {
                tracing::debug!(%section, cycle, newest, "Discarding stale response");
                return ApplyOutcome::Stale { cycle, newest };
            }
        }
        self.applied.insert(section, cycle);

        match payload {
            Payload::Metrics(metrics) => {
                self.view.cards = Some(MetricCards::from_metrics(&metrics));
            }
            Payload::SalesOverview(data) => {
                let spec = ChartSpec::sales_overview(&data);
                self.charts.render(surface, CanvasId::Sales, &spec);
                self.view.sales_chart = Some(spec);
            }
            Payload::SalesByCategory(data) => {
                let spec = ChartSpec::sales_by_category(&data);
                self.charts.render(surface, CanvasId::Category, &spec);
                self.view.category_chart = Some(spec);
            }
            Payload::RecentOrders(orders) => {
                self.view.recent_orders = Some(render::recent_orders(&orders));
            }
            Payload::TopProducts(products) => {
                self.view.top_products = Some(render::top_products(&products));
            }
            Payload::ProductsCheck(check) => {
                tracing::info!(
                    total_products = check.total_products,
                    low_stock_items = check.low_stock_items,
                    "Products data loaded successfully"
                );
                self.view.inventory = Some(InventorySummary {
                    total_products: check.total_products,
                    low_stock_items: check.low_stock_items,
                });
                self.notifier.offer(&check, timers);
            }
        }

        ApplyOutcome::Applied(section)
    }

    /// Route a fired timer
    pub fn on_timer<T>(&mut self, kind: TimerKind, timers: &mut T) -> TimerOutcome
    where
        T: TimerHost<Handle = H>,
    {
        match kind {
            TimerKind::Poll => {
                if !self.started {
                    return TimerOutcome::Ignored;
                }
                // The fired timer is spent; re-arm for the next interval
                self.poll_timer = None;
                self.arm_poll(timers);
                TimerOutcome::PollDue
            }
            TimerKind::NotificationReveal
            | TimerKind::NotificationAutoHide
            | TimerKind::NotificationRemoval => {
                let before = self.notifier.phase();
                self.notifier.on_timer(kind, timers);
                if self.notifier.phase() == before {
                    TimerOutcome::Ignored
                } else {
                    TimerOutcome::NotificationChanged
                }
            }
            TimerKind::FlashDismiss(id) => {
                if self.flashes.on_expired(id) {
                    TimerOutcome::FlashExpired(id)
                } else {
                    TimerOutcome::Ignored
                }
            }
        }
    }

    /// Low-stock toast close button
    pub fn dismiss_notification<T>(&mut self, timers: &mut T) -> bool
    where
        T: TimerHost<Handle = H>,
    {
        self.notifier.dismiss(timers)
    }

    /// Show a flash message
    pub fn push_flash<T>(&mut self, input: FlashInput, timers: &mut T) -> u64
    where
        T: TimerHost<Handle = H>,
    {
        self.flashes.push(input, timers)
    }

    /// Flash message close button
    pub fn dismiss_flash<T>(&mut self, id: u64, timers: &mut T) -> bool
    where
        T: TimerHost<Handle = H>,
    {
        self.flashes.dismiss(id, timers)
    }

    /// Cancel every timer and destroy every chart
    pub fn teardown<S, T>(&mut self, surface: &mut S, timers: &mut T)
    where
        S: ChartSurface<Instance = I>,
        T: TimerHost<Handle = H>,
    {
        self.started = false;
        self.in_flight.clear();
        if let Some(handle) = self.poll_timer.take() {
            timers.cancel(handle);
        }
        self.notifier.teardown(timers);
        self.flashes.teardown(timers);
        self.charts.teardown(surface);
        tracing::debug!("Dashboard torn down");
    }

    fn arm_poll<T>(&mut self, timers: &mut T)
    where
        T: TimerHost<Handle = H>,
    {
        if let Some(previous) = self.poll_timer.take() {
            timers.cancel(previous);
        }
        self.poll_timer = Some(timers.schedule(TimerKind::Poll, self.config.polling.interval()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::tests::CountingSurface;
    use crate::flash::FlashLevel;
    use crate::notifier::NotifierPhase;
    use crate::source::poll_sections;
    use crate::source::tests::StaticSource;
    use crate::timers::ManualTimers;
    use futures_util::StreamExt;
    use serde_json::json;

    type Controller = DashboardController<(CanvasId, u32), u64>;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    async fn run_cycle(
        controller: &mut Controller,
        source: &StaticSource,
        trigger: PollTrigger,
        surface: &mut CountingSurface,
        timers: &mut ManualTimers,
    ) -> Vec<ApplyOutcome> {
        let cycle = controller.begin_cycle(trigger, noon());
        let mut outcomes = Vec::new();
        let mut stream = poll_sections(source);
        while let Some((section, result)) = stream.next().await {
            outcomes.push(controller.apply(cycle, section, result, surface, timers));
        }
        outcomes
    }

    #[tokio::test]
    async fn test_full_cycle_renders_every_section() {
        let source = StaticSource::healthy();
        let mut surface = CountingSurface::default();
        let mut timers = ManualTimers::new();
        let mut controller = Controller::new(DashboardConfig::default());

        let outcomes = run_cycle(
            &mut controller,
            &source,
            PollTrigger::Initial,
            &mut surface,
            &mut timers,
        )
        .await;

        assert!(outcomes.iter().all(|o| matches!(o, ApplyOutcome::Applied(_))));

        let view = controller.view();
        assert_eq!(view.cards.as_ref().unwrap().total_sales, "₱15,230.50");
        assert_eq!(view.recent_orders.as_ref().unwrap().row_count(), 1);
        assert!(view
            .recent_orders
            .as_ref()
            .unwrap()
            .to_html()
            .contains("No pending orders found"));
        assert!(view.top_products.as_ref().unwrap().to_html().contains("Uncategorized"));
        assert_eq!(view.inventory.unwrap().low_stock_items, 4);
        // Initial load leaves the timestamp alone
        assert_eq!(view.last_updated, None);

        assert_eq!(controller.charts().live_count(), 2);
        assert_eq!(controller.notifier().phase(), NotifierPhase::Entering);
        let toast = controller.notifier().toast().unwrap();
        assert_eq!(toast.items.len(), 3);
        assert_eq!(toast.overflow_label().as_deref(), Some("+1 more items"));
    }

    #[tokio::test]
    async fn test_repeated_cycles_keep_single_instances() {
        let source = StaticSource::healthy();
        let mut surface = CountingSurface::default();
        let mut timers = ManualTimers::new();
        let mut controller = Controller::new(DashboardConfig::default());

        for trigger in [PollTrigger::Initial, PollTrigger::Manual, PollTrigger::Timer] {
            run_cycle(&mut controller, &source, trigger, &mut surface, &mut timers).await;
        }

        assert_eq!(controller.charts().live_count(), 2);
        assert_eq!(surface.alive.len(), 2);
        // Only the first low-stock report raised a toast
        assert_eq!(timers.pending_of(TimerKind::NotificationReveal), 1);
        assert_eq!(
            controller.view().last_updated.as_deref(),
            Some("Last updated: 12:00:00")
        );
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut surface = CountingSurface::default();
        let mut timers = ManualTimers::new();
        let mut controller = Controller::new(DashboardConfig::default());

        let slow = controller.begin_cycle(PollTrigger::Initial, noon());
        let fast = controller.begin_cycle(PollTrigger::Manual, noon());

        let fresh = Payload::decode(
            Section::RecentOrders,
            json!({ "success": true, "data": [
                { "id": 2, "customer": "New", "amount": "10.00", "status": "Pending", "date": "today" }
            ]}),
        );
        let old = Payload::decode(Section::RecentOrders, json!({ "success": true, "data": [] }));

        assert_eq!(
            controller.apply(fast, Section::RecentOrders, fresh, &mut surface, &mut timers),
            ApplyOutcome::Applied(Section::RecentOrders)
        );
        assert_eq!(
            controller.apply(slow, Section::RecentOrders, old, &mut surface, &mut timers),
            ApplyOutcome::Stale {
                cycle: slow,
                newest: fast
            }
        );
        assert!(controller
            .view()
            .recent_orders
            .as_ref()
            .unwrap()
            .to_html()
            .contains("New"));
    }

    #[test]
    fn test_older_cycle_applies_when_newer_failed() {
        let mut surface = CountingSurface::default();
        let mut timers = ManualTimers::new();
        let mut controller = Controller::new(DashboardConfig::default());

        let older = controller.begin_cycle(PollTrigger::Initial, noon());
        let newer = controller.begin_cycle(PollTrigger::Manual, noon());

        let failed = controller.apply(
            newer,
            Section::TopProducts,
            Err(DashboardError::Network("reset".into())),
            &mut surface,
            &mut timers,
        );
        assert!(matches!(failed, ApplyOutcome::Failed(_)));

        let applied = controller.apply(
            older,
            Section::TopProducts,
            Ok(Payload::TopProducts(Vec::new())),
            &mut surface,
            &mut timers,
        );
        assert_eq!(applied, ApplyOutcome::Applied(Section::TopProducts));
    }

    #[test]
    fn test_failures_leave_previous_render() {
        let mut surface = CountingSurface::default();
        let mut timers = ManualTimers::new();
        let mut controller = Controller::new(DashboardConfig::default());

        let first = controller.begin_cycle(PollTrigger::Initial, noon());
        controller.apply(
            first,
            Section::TopProducts,
            Ok(Payload::TopProducts(Vec::new())),
            &mut surface,
            &mut timers,
        );
        let before = controller.view().clone();

        let second = controller.begin_cycle(PollTrigger::Initial, noon());
        let skipped = controller.apply(
            second,
            Section::TopProducts,
            Err(DashboardError::Unsuccessful {
                section: Section::TopProducts,
                message: None,
            }),
            &mut surface,
            &mut timers,
        );
        assert!(matches!(skipped, ApplyOutcome::Skipped(_)));
        assert_eq!(controller.view(), &before);
    }

    #[test]
    fn test_start_twice_arms_one_poll_timer() {
        let mut timers = ManualTimers::new();
        let mut controller = Controller::new(DashboardConfig::default());

        controller.start(&mut timers);
        controller.start(&mut timers);
        assert_eq!(timers.pending_of(TimerKind::Poll), 1);

        let kind = timers.pop_due(Duration::from_millis(300_000)).unwrap();
        assert_eq!(controller.on_timer(kind, &mut timers), TimerOutcome::PollDue);
        assert_eq!(timers.pending_of(TimerKind::Poll), 1);
        assert_eq!(timers.next_deadline(), Some(Duration::from_millis(600_000)));
    }

    #[test]
    fn test_overlapping_cycles_stay_loading_until_both_finish() {
        let mut controller = Controller::new(DashboardConfig::default());
        assert!(!controller.is_loading());

        let first = controller.begin_cycle(PollTrigger::Initial, noon());
        let second = controller.begin_cycle(PollTrigger::Manual, noon());
        assert!(controller.is_loading());

        controller.finish_cycle(first);
        assert!(controller.is_loading());

        controller.finish_cycle(second);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_zero_interval_still_advances_the_clock() {
        let mut timers = ManualTimers::new();
        let mut config = DashboardConfig::default();
        config.polling.interval_ms = 0;
        let mut controller = Controller::new(config);

        controller.start(&mut timers);
        let first = timers.next_deadline().unwrap();
        assert!(first > Duration::ZERO);

        let kind = timers.pop_due(first).unwrap();
        assert_eq!(controller.on_timer(kind, &mut timers), TimerOutcome::PollDue);
        assert!(timers.pop_due(first).is_none());
        assert_eq!(timers.next_deadline(), Some(first * 2));
    }

    #[test]
    fn test_teardown_clears_everything() {
        let mut surface = CountingSurface::default();
        let mut timers = ManualTimers::new();
        let mut controller = Controller::new(DashboardConfig::default());
        controller.start(&mut timers);

        let cycle = controller.begin_cycle(PollTrigger::Initial, noon());
        let check = Payload::decode(
            Section::ProductsCheck,
            json!({ "success": true, "data": {
                "totalProducts": 3, "lowStockItems": 1,
                "lowStockProducts": [{ "name": "SSD", "stock": 1 }]
            }}),
        );
        controller.apply(cycle, Section::ProductsCheck, check, &mut surface, &mut timers);
        let overview = Payload::SalesOverview(crate::charts::tests::overview());
        controller.apply(cycle, Section::SalesOverview, Ok(overview), &mut surface, &mut timers);
        controller.push_flash(
            FlashInput {
                level: FlashLevel::Success,
                text: "Welcome back".into(),
            },
            &mut timers,
        );
        assert_eq!(timers.pending(), 3);

        controller.teardown(&mut surface, &mut timers);
        assert_eq!(timers.pending(), 0);
        assert!(surface.alive.is_empty());
        assert!(!controller.is_started());
        assert_eq!(controller.on_timer(TimerKind::Poll, &mut timers), TimerOutcome::Ignored);
    }

    #[test]
    fn test_notification_timers_route_through_controller() {
        let mut surface = CountingSurface::default();
        let mut timers = ManualTimers::new();
        let mut controller = Controller::new(DashboardConfig::default());

        let cycle = controller.begin_cycle(PollTrigger::Initial, noon());
        let check = Payload::decode(
            Section::ProductsCheck,
            json!({ "success": true, "data": {
                "totalProducts": 3, "lowStockItems": 1,
                "lowStockProducts": [{ "name": "SSD", "stock": 1 }]
            }}),
        );
        controller.apply(cycle, Section::ProductsCheck, check, &mut surface, &mut timers);

        let kind = timers.pop_due(Duration::from_millis(500)).unwrap();
        assert_eq!(
            controller.on_timer(kind, &mut timers),
            TimerOutcome::NotificationChanged
        );
        assert_eq!(controller.notifier().phase(), NotifierPhase::Visible);

        assert!(controller.dismiss_notification(&mut timers));
        let kind = timers.pop_due(Duration::from_millis(800)).unwrap();
        controller.on_timer(kind, &mut timers);
        assert_eq!(controller.notifier().phase(), NotifierPhase::Absent);
    }
}
