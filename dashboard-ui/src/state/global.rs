//! Global Application State
//!
//! Reactive mirror of the dashboard controller. The controller is the single
//! owner of charts, timers and sequence numbers; components read the signals
//! here and call back into [`DashboardState`] for every user action.

use futures_util::StreamExt;
use leptos::*;
use storefront_dashboard::{
    poll_sections, ApplyOutcome, DashboardConfig, DashboardController, DashboardView,
    DropdownState, FlashMessage, LowStockToast, NotifierPhase, PollTrigger, ShellState,
    TimerKind, TimerOutcome,
};

use crate::api::{self, GlooSource};
use crate::components::chart::{CanvasChart, CanvasSurface};
use crate::state::timers::BrowserTimers;

pub type Controller = DashboardController<CanvasChart, i32>;

/// What the low-stock toast component renders
#[derive(Clone, Debug, PartialEq)]
pub struct NotificationSnapshot {
    pub phase: NotifierPhase,
    pub toast: LowStockToast,
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct DashboardState {
    /// Sidebar and overlay
    pub shell: RwSignal<ShellState>,
    /// User menu in the header
    pub dropdown: RwSignal<DropdownState>,
    /// Last rendered sections
    pub view: RwSignal<DashboardView>,
    /// Low-stock toast, when one is attached
    pub notification: RwSignal<Option<NotificationSnapshot>>,
    /// Open flash alerts
    pub flashes: RwSignal<Vec<FlashMessage>>,
    /// Some poll cycle is still in flight
    pub loading: RwSignal<bool>,
    /// Date range filter selection. Not sent to the server.
    pub date_range: RwSignal<String>,
    controller: StoredValue<Controller>,
}

/// Provide global state to the component tree
pub fn provide_dashboard_state() -> DashboardState {
    let mut config = DashboardConfig::default();
    config.api.base_url = api::get_api_base();

    let state = DashboardState {
        shell: create_rw_signal(ShellState::new()),
        dropdown: create_rw_signal(DropdownState::default()),
        view: create_rw_signal(DashboardView::default()),
        notification: create_rw_signal(None),
        flashes: create_rw_signal(Vec::new()),
        loading: create_rw_signal(false),
        date_range: create_rw_signal("week".to_string()),
        controller: store_value(DashboardController::new(config)),
    };

    provide_context(state);
    state
}

/// Dashboard state from context
pub fn use_dashboard() -> DashboardState {
    use_context::<DashboardState>().expect("DashboardState not found")
}

impl DashboardState {
    /// Arm the poll timer, take over the page's flash messages and run the
    /// initial poll cycle
    pub fn start(self) {
        let mut timers = BrowserTimers::new(self);
        self.controller.update_value(|c| {
            c.start(&mut timers);
            let server_alerts = api::adopt_server_alerts();
            for message in server_alerts.into_iter().chain(api::embedded_flash_messages()) {
                c.push_flash(message, &mut timers);
            }
        });
        self.sync();
        self.refresh(PollTrigger::Initial);
    }

    /// Run one poll cycle, applying sections as their responses arrive
    pub fn refresh(self, trigger: PollTrigger) {
        let now = chrono::Local::now().time();
        let Some(cycle) = self.controller.try_update_value(|c| c.begin_cycle(trigger, now)) else {
            return;
        };
        let api = self.controller.with_value(|c| c.config().api.clone());

        self.sync();

        spawn_local(async move {
            let source = GlooSource::new(api);
            let mut results = poll_sections(&source);

            while let Some((section, result)) = results.next().await {
                let mut timers = BrowserTimers::new(self);
                let outcome = self.controller.try_update_value(|c| {
                    c.apply(cycle, section, result, &mut CanvasSurface, &mut timers)
                });

                match outcome {
                    // Page torn down while the cycle was in flight
                    None => return,
                    Some(ApplyOutcome::Failed(e)) => {
                        web_sys::console::error_1(
                            &format!("Error loading {}: {}", section, e).into(),
                        );
                    }
                    Some(ApplyOutcome::Applied(_)) => self.sync(),
                    Some(_) => {}
                }
            }

            if self
                .controller
                .try_update_value(|c| c.finish_cycle(cycle))
                .is_some()
            {
                self.sync();
            }
        });
    }

    /// Route a fired browser timer into the controller
    pub fn on_timer(self, kind: TimerKind) {
        let mut timers = BrowserTimers::new(self);
        let outcome = self
            .controller
            .try_update_value(|c| c.on_timer(kind, &mut timers));

        match outcome {
            Some(TimerOutcome::PollDue) => self.refresh(PollTrigger::Timer),
            Some(TimerOutcome::NotificationChanged) | Some(TimerOutcome::FlashExpired(_)) => {
                self.sync()
            }
            Some(TimerOutcome::Ignored) | None => {}
        }
    }

    /// Date range filter changed
    pub fn select_date_range(self, value: String) {
        self.date_range.set(value);
        self.refresh(PollTrigger::DateRangeChanged);
    }

    /// A sidebar menu item was clicked
    pub fn menu_item_clicked(self) {
        let width = web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .unwrap_or(f64::MAX);
        let breakpoint = self
            .controller
            .with_value(|c| c.config().layout.mobile_breakpoint_px);

        self.shell.update(|shell| {
            shell.menu_item_clicked(width, breakpoint);
        });
    }

    /// Low-stock toast close button
    pub fn dismiss_notification(self) {
        let mut timers = BrowserTimers::new(self);
        if self
            .controller
            .try_update_value(|c| c.dismiss_notification(&mut timers))
            .unwrap_or(false)
        {
            self.sync();
        }
    }

    /// Flash alert close button
    pub fn dismiss_flash(self, id: u64) {
        let mut timers = BrowserTimers::new(self);
        if self
            .controller
            .try_update_value(|c| c.dismiss_flash(id, &mut timers))
            .unwrap_or(false)
        {
            self.sync();
        }
    }

    /// Cancel every timer and destroy the charts
    pub fn teardown(self) {
        let mut timers = BrowserTimers::new(self);
        self.controller
            .try_update_value(|c| c.teardown(&mut CanvasSurface, &mut timers));
    }

    /// Copy the controller's state into the signals
    fn sync(self) {
        let snapshot = self.controller.try_with_value(|c| {
            let notification = c.notifier().toast().map(|toast| NotificationSnapshot {
                phase: c.notifier().phase(),
                toast: toast.clone(),
            });
            (
                c.view().clone(),
                notification,
                c.flashes().messages().to_vec(),
                c.is_loading(),
            )
        });

        if let Some((view, notification, flashes, loading)) = snapshot {
            self.loading.set(loading);
            self.view.set(view);
            self.notification.set(notification);
            self.flashes.set(flashes);
        }
    }
}
