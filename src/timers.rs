//! Timer Host
//!
//! The controller never sleeps. It asks a [`TimerHost`] to schedule
//! one-shot timers and keeps the returned handles so it can cancel them on
//! teardown. The browser dashboard schedules through `gloo-timers`; the
//! terminal client and the tests use [`ManualTimers`], a virtual clock.

use std::collections::BTreeMap;
use std::time::Duration;

/// What a timer fires for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Next poll cycle is due
    Poll,
    /// Low-stock toast finishes its entry delay
    NotificationReveal,
    /// Low-stock toast hides itself
    NotificationAutoHide,
    /// Hidden low-stock toast is detached
    NotificationRemoval,
    /// Flash message with the given id expires
    FlashDismiss(u64),
}

/// Platform service that runs one-shot timers
pub trait TimerHost {
    type Handle;

    /// Fire `kind` back into the controller after `delay`
    fn schedule(&mut self, kind: TimerKind, delay: Duration) -> Self::Handle;

    /// Cancel a timer that has not fired yet
    fn cancel(&mut self, handle: Self::Handle);
}

/// Deterministic timer host driven by an explicit virtual clock.
///
/// Timers are only fired by the owner calling [`ManualTimers::pop_due`],
/// so handling a fired timer may schedule new ones without re-entrancy.
#[derive(Debug, Default)]
pub struct ManualTimers {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, u64), TimerKind>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of armed timers
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Number of armed timers of one kind
    pub fn pending_of(&self, kind: TimerKind) -> usize {
        self.pending.values().filter(|k| **k == kind).count()
    }

    /// Deadline of the earliest armed timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerKind> {
        let key = *self.pending.keys().next()?;
        if key.0 > until {
            return None;
        }
        self.now = self.now.max(key.0);
        self.pending.remove(&key)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }
}

impl TimerHost for ManualTimers {
    type Handle = u64;

    fn schedule(&mut self, kind: TimerKind, delay: Duration) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert((self.now + delay, id), kind);
        id
    }

    fn cancel(&mut self, handle: u64) {
        self.pending.retain(|(_, id), _| *id != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = ManualTimers::new();
        timers.schedule(TimerKind::NotificationAutoHide, Duration::from_millis(10_000));
        timers.schedule(TimerKind::NotificationReveal, Duration::from_millis(500));

        assert_eq!(timers.next_deadline(), Some(Duration::from_millis(500)));
        assert_eq!(timers.pop_due(Duration::from_millis(400)), None);
        assert_eq!(
            timers.pop_due(Duration::from_secs(60)),
            Some(TimerKind::NotificationReveal)
        );
        assert_eq!(timers.now(), Duration::from_millis(500));
        assert_eq!(
            timers.pop_due(Duration::from_secs(60)),
            Some(TimerKind::NotificationAutoHide)
        );
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_cancel() {
        let mut timers = ManualTimers::new();
        let handle = timers.schedule(TimerKind::Poll, Duration::from_secs(300));
        timers.schedule(TimerKind::FlashDismiss(1), Duration::from_secs(5));

        timers.cancel(handle);
        assert_eq!(timers.pending_of(TimerKind::Poll), 0);
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn test_schedule_relative_to_now() {
        let mut timers = ManualTimers::new();
        timers.advance_to(Duration::from_secs(10));
        timers.schedule(TimerKind::Poll, Duration::from_secs(5));
        assert_eq!(timers.next_deadline(), Some(Duration::from_secs(15)));
    }
}
