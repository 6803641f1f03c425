//! Flash Messages
//!
//! Alerts handed over by the server-rendered page. Each closes itself
//! after the configured delay unless the user closes it first.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::timers::{TimerHost, TimerKind};

/// Message severity, matching the server's message tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    #[serde(alias = "danger")]
    Error,
}

impl FlashLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashLevel::Success => "alert alert-success",
            FlashLevel::Info => "alert alert-info",
            FlashLevel::Warning => "alert alert-warning",
            FlashLevel::Error => "alert alert-danger",
        }
    }
}

/// A message as embedded in the page
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FlashInput {
    pub level: FlashLevel,
    pub text: String,
}

/// A message on the board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlashMessage {
    pub id: u64,
    pub level: FlashLevel,
    pub text: String,
}

/// Open flash messages and their expiry timers
#[derive(Debug)]
pub struct FlashBoard<H> {
    ttl: Duration,
    next_id: u64,
    messages: Vec<FlashMessage>,
    timers: HashMap<u64, H>,
}

impl<H> FlashBoard<H> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 1,
            messages: Vec::new(),
            timers: HashMap::new(),
        }
    }

    pub fn messages(&self) -> &[FlashMessage] {
        &self.messages
    }

    /// Show a message and arm its expiry. Returns its id.
    pub fn push<T>(&mut self, input: FlashInput, timers: &mut T) -> u64
    where
        T: TimerHost<Handle = H>,
    {
        let id = self.next_id;
        self.next_id += 1;

        self.messages.push(FlashMessage {
            id,
            level: input.level,
            text: input.text,
        });
        let handle = timers.schedule(TimerKind::FlashDismiss(id), self.ttl);
        self.timers.insert(id, handle);
        id
    }

    /// Close button
    pub fn dismiss<T>(&mut self, id: u64, timers: &mut T) -> bool
    where
        T: TimerHost<Handle = H>,
    {
        if let Some(handle) = self.timers.remove(&id) {
            timers.cancel(handle);
        }
        self.remove(id)
    }

    /// Expiry timer fired
    pub fn on_expired(&mut self, id: u64) -> bool {
        self.timers.remove(&id);
        self.remove(id)
    }

    pub fn teardown<T>(&mut self, timers: &mut T)
    where
        T: TimerHost<Handle = H>,
    {
        for (_, handle) in self.timers.drain() {
            timers.cancel(handle);
        }
        self.messages.clear();
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        self.messages.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timers::ManualTimers;

    fn info(text: &str) -> FlashInput {
        FlashInput {
            level: FlashLevel::Info,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_expiry() {
        let mut timers = ManualTimers::new();
        let mut board = FlashBoard::new(Duration::from_secs(5));

        let first = board.push(info("Product saved"), &mut timers);
        board.push(info("Stock updated"), &mut timers);
        assert_eq!(board.messages().len(), 2);

        assert_eq!(
            timers.pop_due(Duration::from_secs(5)),
            Some(TimerKind::FlashDismiss(first))
        );
        assert!(board.on_expired(first));
        assert_eq!(board.messages()[0].text, "Stock updated");
    }

    #[test]
    fn test_manual_close_cancels_timer() {
        let mut timers = ManualTimers::new();
        let mut board = FlashBoard::new(Duration::from_secs(5));

        let id = board.push(info("Saved"), &mut timers);
        assert!(board.dismiss(id, &mut timers));
        assert_eq!(timers.pending(), 0);
        assert!(!board.on_expired(id));
    }

    #[test]
    fn test_level_parsing() {
        let input: FlashInput =
            serde_json::from_str(r#"{"level":"danger","text":"Delete failed"}"#).unwrap();
        assert_eq!(input.level, FlashLevel::Error);
        assert_eq!(input.level.css_class(), "alert alert-danger");
    }

    #[test]
    fn test_teardown() {
        let mut timers = ManualTimers::new();
        let mut board = FlashBoard::new(Duration::from_secs(5));
        board.push(info("a"), &mut timers);
        board.push(info("b"), &mut timers);

        board.teardown(&mut timers);
        assert!(board.messages().is_empty());
        assert_eq!(timers.pending(), 0);
    }
}
