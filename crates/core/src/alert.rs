//! Transient user-facing notifications
//!
//! Every action outcome in the console ends up here: an entry with a
//! monotonically increasing id and a severity. Entries expire on their own
//! after [`ALERT_TIMEOUT`] or when the user closes them.

use crate::traits::Notify;
use std::time::{Duration, Instant};

/// How long an alert stays visible
pub const ALERT_TIMEOUT: Duration = Duration::from_secs(8);

// ============================================================================
// Alert Variant
// ============================================================================

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlertVariant {
    #[default]
    Default,
    Info,
    Success,
    Warning,
    Danger,
}

impl AlertVariant {
    /// Icon shown next to the message
    pub fn icon(&self) -> &'static str {
        match self {
            AlertVariant::Default => "🔔",
            AlertVariant::Info => "ℹ️",
            AlertVariant::Success => "✅",
            AlertVariant::Warning => "⚠️",
            AlertVariant::Danger => "❌",
        }
    }

    /// Lowercase name, also used as CSS modifier
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertVariant::Default => "default",
            AlertVariant::Info => "info",
            AlertVariant::Success => "success",
            AlertVariant::Warning => "warning",
            AlertVariant::Danger => "danger",
        }
    }
}

// ============================================================================
// Alert
// ============================================================================

/// A single notification
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub message: String,
    pub variant: AlertVariant,
    pub created: Instant,
}

impl Alert {
    /// Whether the alert has outlived [`ALERT_TIMEOUT`] at `now`
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= ALERT_TIMEOUT
    }
}

// ============================================================================
// Alert Queue
// ============================================================================

/// Ordered queue of visible alerts, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertQueue {
    alerts: Vec<Alert>,
    next_id: u64,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alert created now, returning its id
    pub fn add(&mut self, message: impl Into<String>, variant: AlertVariant) -> u64 {
        self.add_at(message, variant, Instant::now())
    }

    /// Append an alert with an explicit creation time
    pub fn add_at(
        &mut self,
        message: impl Into<String>,
        variant: AlertVariant,
        created: Instant,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        let message = message.into();
        tracing::debug!(id, variant = variant.as_str(), "alert: {}", message);
        self.alerts.push(Alert {
            id,
            message,
            variant,
            created,
        });
        id
    }

    /// Remove one alert; returns false if it was already gone
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        self.alerts.len() != before
    }

    /// Drop every alert that expired at `now`, returning how many were removed
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.alerts.len();
        self.alerts.retain(|a| !a.is_expired(now));
        before - self.alerts.len()
    }

    /// Visible alerts, newest last
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Most recently added alert still visible
    pub fn last(&self) -> Option<&Alert> {
        self.alerts.last()
    }

    /// Whether any visible alert has this exact message
    pub fn contains(&self, message: &str) -> bool {
        self.alerts.iter().any(|a| a.message == message)
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
    }
}

impl Notify for AlertQueue {
    fn add_alert(&mut self, message: impl Into<String>, variant: AlertVariant) {
        self.add(message, variant);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ids_increase() {
        let mut queue = AlertQueue::new();
        let a = queue.add("first", AlertVariant::Success);
        let b = queue.add("second", AlertVariant::Danger);
        queue.dismiss(a);
        let c = queue.add("third", AlertVariant::Info);

        assert!(a < b && b < c);
        let messages: Vec<&str> = queue.alerts().iter().map(|a| a.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "third"]);
    }

    #[test]
    fn test_dismiss_removes_exactly_one() {
        let mut queue = AlertQueue::new();
        let a = queue.add("same", AlertVariant::Default);
        queue.add("same", AlertVariant::Default);

        assert!(queue.dismiss(a));
        assert_eq!(queue.len(), 1);
        assert!(!queue.dismiss(a));
    }

    #[test]
    fn test_expire_after_timeout() {
        let start = Instant::now();
        let mut queue = AlertQueue::new();
        queue.add_at("old", AlertVariant::Warning, start);
        queue.add_at("new", AlertVariant::Warning, start + Duration::from_secs(5));

        assert_eq!(queue.expire(start + Duration::from_secs(7)), 0);
        assert_eq!(queue.expire(start + ALERT_TIMEOUT), 1);
        assert_eq!(queue.last().map(|a| a.message.as_str()), Some("new"));
        assert_eq!(queue.expire(start + Duration::from_secs(13)), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_notify_impl() {
        let mut queue = AlertQueue::new();
        queue.add_alert("Client created successfully", AlertVariant::Success);
        assert!(queue.contains("Client created successfully"));
        assert_eq!(queue.last().map(|a| a.variant), Some(AlertVariant::Success));
    }
}
