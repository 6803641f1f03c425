//! Low-Stock Notifier
//!
//! One transient toast at a time:
//!
//! ```text
//! Absent --offer--> Entering --reveal--> Visible --close/auto-hide--> Hiding --removal--> Absent
//!                      |                                                ^
//!                      +--------------------- close --------------------+
//! ```
//!
//! While a toast exists, new low-stock reports are dropped. Exactly one
//! timer is armed in every phase except `Absent`.

use serde::Serialize;
use std::time::Duration;

use crate::config::NotificationConfig;
use crate::model::ProductsCheck;
use crate::timers::{TimerHost, TimerKind};

/// Toast lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifierPhase {
    /// No toast in the document
    Absent,
    /// Attached, waiting for the entry animation
    Entering,
    /// Fully shown
    Visible,
    /// Exit animation running
    Hiding,
}

impl NotifierPhase {
    /// CSS classes for the toast element in this phase
    pub fn css_class(&self) -> &'static str {
        match self {
            NotifierPhase::Absent | NotifierPhase::Entering => "low-stock-notification",
            NotifierPhase::Visible => "low-stock-notification notification-visible",
            NotifierPhase::Hiding => {
                "low-stock-notification notification-visible notification-hiding"
            }
        }
    }
}

/// Content of the toast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowStockToast {
    /// Products below threshold, as reported by the server
    pub count: u64,
    /// First few products with their stock
    pub items: Vec<LowStockItem>,
    /// Products not listed
    pub overflow: usize,
    pub view_all_href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowStockItem {
    pub name: String,
    pub stock: i64,
}

impl LowStockToast {
    pub fn from_check(check: &ProductsCheck, max_listed: usize, view_all_href: &str) -> Self {
        let items = check
            .low_stock_products
            .iter()
            .take(max_listed)
            .map(|p| LowStockItem {
                name: p.name.clone(),
                stock: p.stock,
            })
            .collect();

        Self {
            count: check.low_stock_items,
            items,
            overflow: check.low_stock_products.len().saturating_sub(max_listed),
            view_all_href: view_all_href.to_string(),
        }
    }

    /// `You have 4 products with low stock.`
    pub fn headline(&self) -> String {
        format!("You have {} products with low stock.", self.count)
    }

    /// `+2 more items`, when some products were not listed
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} more items", self.overflow))
    }
}

/// Owns the single low-stock toast and its timer
#[derive(Debug)]
pub struct LowStockNotifier<H> {
    config: NotificationConfig,
    phase: NotifierPhase,
    toast: Option<LowStockToast>,
    pending: Option<H>,
}

impl<H> LowStockNotifier<H> {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            phase: NotifierPhase::Absent,
            toast: None,
            pending: None,
        }
    }

    pub fn phase(&self) -> NotifierPhase {
        self.phase
    }

    /// Current toast, if one is attached
    pub fn toast(&self) -> Option<&LowStockToast> {
        self.toast.as_ref()
    }

    pub fn is_present(&self) -> bool {
        self.phase != NotifierPhase::Absent
    }

    /// Raise a toast for a products check. Returns whether one was created.
    pub fn offer<T>(&mut self, check: &ProductsCheck, timers: &mut T) -> bool
    where
        T: TimerHost<Handle = H>,
    {
        if check.low_stock_items == 0 || self.is_present() {
            return false;
        }

        self.toast = Some(LowStockToast::from_check(
            check,
            self.config.max_listed,
            &self.config.view_all_href,
        ));
        self.phase = NotifierPhase::Entering;
        self.arm(
            timers,
            TimerKind::NotificationReveal,
            self.config.reveal_delay_ms,
        );

        tracing::info!(count = check.low_stock_items, "Low stock notification raised");
        true
    }

    /// Close button. Returns whether the toast started hiding.
    pub fn dismiss<T>(&mut self, timers: &mut T) -> bool
    where
        T: TimerHost<Handle = H>,
    {
        match self.phase {
            NotifierPhase::Entering | NotifierPhase::Visible => {
                self.begin_hiding(timers);
                true
            }
            NotifierPhase::Absent | NotifierPhase::Hiding => false,
        }
    }

    /// Handle a fired notifier timer. Kinds that do not match the current
    /// phase are ignored.
    pub fn on_timer<T>(&mut self, kind: TimerKind, timers: &mut T)
    where
        T: TimerHost<Handle = H>,
    {
        match (kind, self.phase) {
            (TimerKind::NotificationReveal, NotifierPhase::Entering) => {
                self.pending = None;
                self.phase = NotifierPhase::Visible;
                self.arm(
                    timers,
                    TimerKind::NotificationAutoHide,
                    self.config.auto_hide_ms,
                );
            }
            (TimerKind::NotificationAutoHide, NotifierPhase::Visible) => {
                self.pending = None;
                self.begin_hiding(timers);
            }
            (TimerKind::NotificationRemoval, NotifierPhase::Hiding) => {
                self.pending = None;
                self.phase = NotifierPhase::Absent;
                self.toast = None;
                tracing::debug!("Low stock notification removed");
            }
            _ => {}
        }
    }

    /// Cancel the pending timer and drop the toast
    pub fn teardown<T>(&mut self, timers: &mut T)
    where
        T: TimerHost<Handle = H>,
    {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
        self.phase = NotifierPhase::Absent;
        self.toast = None;
    }

    fn begin_hiding<T>(&mut self, timers: &mut T)
    where
        T: TimerHost<Handle = H>,
    {
        self.phase = NotifierPhase::Hiding;
        self.arm(
            timers,
            TimerKind::NotificationRemoval,
            self.config.removal_delay_ms,
        );
    }

    fn arm<T>(&mut self, timers: &mut T, kind: TimerKind, delay_ms: u64)
    where
        T: TimerHost<Handle = H>,
    {
        if let Some(previous) = self.pending.take() {
            timers.cancel(previous);
        }
        self.pending = Some(timers.schedule(kind, Duration::from_millis(delay_ms)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LowStockProduct;
    use crate::timers::ManualTimers;

    fn check(names: &[&str]) -> ProductsCheck {
        ProductsCheck {
            total_products: 50,
            low_stock_items: names.len() as u64,
            low_stock_threshold: Some(10),
            low_stock_products: names
                .iter()
                .enumerate()
                .map(|(i, name)| LowStockProduct {
                    id: Some(i as u64),
                    name: name.to_string(),
                    category: None,
                    stock: i as i64,
                    image: None,
                })
                .collect(),
        }
    }

    /// Fire every timer due up to `ms`
    fn run_until(
        notifier: &mut LowStockNotifier<u64>,
        timers: &mut ManualTimers,
        ms: u64,
    ) {
        let until = Duration::from_millis(ms);
        while let Some(kind) = timers.pop_due(until) {
            notifier.on_timer(kind, timers);
        }
        timers.advance_to(until);
    }

    #[test]
    fn test_toast_content() {
        let toast = LowStockToast::from_check(
            &check(&["A", "B", "C", "D", "E"]),
            3,
            "/dashboard/products/?filter=low_stock",
        );
        assert_eq!(toast.items.len(), 3);
        assert_eq!(toast.items[2].name, "C");
        assert_eq!(toast.overflow_label().as_deref(), Some("+2 more items"));
        assert_eq!(toast.headline(), "You have 5 products with low stock.");

        let small = LowStockToast::from_check(&check(&["A"]), 3, "/x");
        assert_eq!(small.overflow_label(), None);
    }

    #[test]
    fn test_at_most_one_toast() {
        let mut timers = ManualTimers::new();
        let mut notifier = LowStockNotifier::new(NotificationConfig::default());

        assert!(notifier.offer(&check(&["A", "B"]), &mut timers));
        assert!(!notifier.offer(&check(&["C"]), &mut timers));
        assert_eq!(notifier.toast().unwrap().items[0].name, "A");
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn test_no_toast_without_low_stock() {
        let mut timers = ManualTimers::new();
        let mut notifier = LowStockNotifier::new(NotificationConfig::default());

        assert!(!notifier.offer(&check(&[]), &mut timers));
        assert_eq!(notifier.phase(), NotifierPhase::Absent);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_auto_hide_lifecycle() {
        let mut timers = ManualTimers::new();
        let mut notifier = LowStockNotifier::new(NotificationConfig::default());
        notifier.offer(&check(&["A"]), &mut timers);

        run_until(&mut notifier, &mut timers, 499);
        assert_eq!(notifier.phase(), NotifierPhase::Entering);

        run_until(&mut notifier, &mut timers, 500);
        assert_eq!(notifier.phase(), NotifierPhase::Visible);

        // Auto-hide is measured from becoming visible
        run_until(&mut notifier, &mut timers, 10_499);
        assert_eq!(notifier.phase(), NotifierPhase::Visible);
        run_until(&mut notifier, &mut timers, 10_500);
        assert_eq!(notifier.phase(), NotifierPhase::Hiding);

        run_until(&mut notifier, &mut timers, 10_799);
        assert!(notifier.is_present());
        run_until(&mut notifier, &mut timers, 10_800);
        assert_eq!(notifier.phase(), NotifierPhase::Absent);
        assert!(notifier.toast().is_none());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_close_click_wins_over_auto_hide() {
        let mut timers = ManualTimers::new();
        let mut notifier = LowStockNotifier::new(NotificationConfig::default());
        notifier.offer(&check(&["A"]), &mut timers);
        run_until(&mut notifier, &mut timers, 2_000);

        assert!(notifier.dismiss(&mut timers));
        assert!(!notifier.dismiss(&mut timers));
        assert_eq!(timers.pending_of(TimerKind::NotificationAutoHide), 0);

        run_until(&mut notifier, &mut timers, 2_300);
        assert_eq!(notifier.phase(), NotifierPhase::Absent);

        // A new report is accepted once the old toast is gone
        assert!(notifier.offer(&check(&["B"]), &mut timers));
    }

    #[test]
    fn test_close_during_entry() {
        let mut timers = ManualTimers::new();
        let mut notifier = LowStockNotifier::new(NotificationConfig::default());
        notifier.offer(&check(&["A"]), &mut timers);

        assert!(notifier.dismiss(&mut timers));
        assert_eq!(timers.pending_of(TimerKind::NotificationReveal), 0);
        run_until(&mut notifier, &mut timers, 300);
        assert_eq!(notifier.phase(), NotifierPhase::Absent);
    }

    #[test]
    fn test_stray_timer_ignored() {
        let mut timers = ManualTimers::new();
        let mut notifier: LowStockNotifier<u64> =
            LowStockNotifier::new(NotificationConfig::default());

        notifier.on_timer(TimerKind::NotificationRemoval, &mut timers);
        notifier.on_timer(TimerKind::NotificationAutoHide, &mut timers);
        assert_eq!(notifier.phase(), NotifierPhase::Absent);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_teardown_cancels_timer() {
        let mut timers = ManualTimers::new();
        let mut notifier = LowStockNotifier::new(NotificationConfig::default());
        notifier.offer(&check(&["A"]), &mut timers);

        notifier.teardown(&mut timers);
        assert_eq!(timers.pending(), 0);
        assert!(!notifier.is_present());
    }
}
