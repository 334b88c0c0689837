//! In-app toast queue backing the notification sink.

use crate::domain::{NotificationSink, Severity};
use std::collections::VecDeque;

/// Most toasts kept on screen at once; older ones are dropped first.
pub const MAX_TOASTS: usize = 5;

/// Ticks a toast stays visible when no lifetime is configured.
pub const DEFAULT_TOAST_TICKS: u32 = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub severity: Severity,
    pub title: String,
    pub detail: Option<String>,
    pub ticks_left: u32,
}

#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    lifetime_ticks: u32,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TICKS)
    }
}

impl ToastQueue {
    pub fn new(lifetime_ticks: u32) -> Self {
        Self {
            toasts: VecDeque::with_capacity(MAX_TOASTS),
            lifetime_ticks: lifetime_ticks.max(1),
        }
    }

    /// Ages every toast by one tick and drops the expired ones.
    pub fn tick(&mut self) {
        for toast in &mut self.toasts {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
        }
        self.toasts.retain(|toast| toast.ticks_left > 0);
    }

    pub fn dismiss_oldest(&mut self) -> Option<Toast> {
        self.toasts.pop_front()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&mut self, severity: Severity, title: &str, detail: Option<&str>) {
        tracing::debug!(?severity, title, detail, "notification");
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            severity,
            title: title.to_string(),
            detail: detail.map(str::to_string),
            ticks_left: self.lifetime_ticks,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_appends() {
        let mut queue = ToastQueue::default();
        queue.notify(Severity::Error, "Failed to create application", Some("name taken"));

        let toast = queue.latest().unwrap();
        assert_eq!(toast.severity, Severity::Error);
        assert_eq!(toast.title, "Failed to create application");
        assert_eq!(toast.detail.as_deref(), Some("name taken"));
        assert_eq!(toast.ticks_left, DEFAULT_TOAST_TICKS);
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut queue = ToastQueue::default();
        for i in 0..8 {
            queue.notify(Severity::Info, &format!("toast {i}"), None);
        }
        assert_eq!(queue.len(), MAX_TOASTS);
        assert_eq!(queue.iter().next().unwrap().title, "toast 3");
    }

    #[test]
    fn test_toasts_expire() {
        let mut queue = ToastQueue::new(2);
        queue.notify(Severity::Success, "done", None);
        queue.tick();
        assert_eq!(queue.len(), 1);
        queue.tick();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss_oldest() {
        let mut queue = ToastQueue::default();
        queue.notify(Severity::Info, "first", None);
        queue.notify(Severity::Info, "second", None);
        assert_eq!(queue.dismiss_oldest().unwrap().title, "first");
        assert_eq!(queue.len(), 1);
    }
}
