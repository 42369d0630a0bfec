//! Transient toast notifications.
//!
//! Toasts auto-dismiss after [`TOAST_TTL`]; the status line shows the newest
//! live ones. The queue is append-only from the controller's side.
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

pub const TOAST_TTL: Duration = Duration::from_secs(3);
const MAX_VISIBLE: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub level: Level,
    pub message: String,
    pub created_at: Instant,
}

impl Toast {
    pub fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) < TOAST_TTL
    }
}

#[derive(Clone, Debug, Default)]
pub struct Notifications {
    toasts: Vec<Toast>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        let message = message.into();
        match level {
            Level::Error => error!(%message, "notify"),
            Level::Warning => warn!(%message, "notify"),
            Level::Info | Level::Success => info!(%message, "notify"),
        }
        self.toasts.push(Toast { level, message, created_at: Instant::now() });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Level::Success, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Level::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message);
    }

    /// Drop expired toasts.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| t.is_live(now));
    }

    /// Newest live toasts first, at most three.
    pub fn visible(&self, now: Instant) -> Vec<&Toast> {
        self.toasts.iter().rev().filter(|t| t.is_live(now)).take(MAX_VISIBLE).collect()
    }

    /// Every toast pushed and not yet pruned, oldest first.
    pub fn all(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let mut n = Notifications::new();
        n.info("hello");
        let now = Instant::now();
        assert_eq!(n.visible(now).len(), 1);
        let later = now + TOAST_TTL + Duration::from_millis(1);
        assert!(n.visible(later).is_empty());
        n.prune(later);
        assert!(n.all().is_empty());
    }

    #[test]
    fn visible_is_newest_first_and_capped() {
        let mut n = Notifications::new();
        for i in 0..5 {
            n.success(format!("m{i}"));
        }
        let v = n.visible(Instant::now());
        assert_eq!(v.len(), 3);
        assert_eq!(v[0].message, "m4");
        assert_eq!(n.last().map(|t| t.level), Some(Level::Success));
    }
}
