//! # Console Operations
//!
//! One async function per user action. Each op calls the admin API, reports
//! the outcome into a [`Notify`] sink and swallows the error afterwards, so
//! components only decide what to refresh next.
//!
//! Bulk ops issue every request, alert each failure individually and finish
//! with one summary alert built from a [`BulkOutcome`].

pub mod advanced;
pub mod client_scopes;
pub mod clients;
pub mod groups;
pub mod identity_providers;
pub mod mappers;
pub mod roles;
pub mod users;

use kc_console_core::{ConsoleError, ConsoleResult, Notify};

/// Danger alert text for a failed request: `{prefix} '{error}'`
pub fn failure_message(prefix: &str, err: &ConsoleError) -> String {
    format!("{} '{}'", prefix, err)
}

/// Report a single-request outcome, returning the value on success
pub(crate) fn report<T>(
    result: ConsoleResult<T>,
    success: &str,
    failure: &str,
    alerts: &mut impl Notify,
) -> Option<T> {
    match result {
        Ok(value) => {
            alerts.success(success);
            Some(value)
        }
        Err(err) => {
            tracing::warn!("{}: {}", failure, err);
            alerts.danger(failure_message(failure, &err));
            None
        }
    }
}

// ============================================================================
// Bulk Outcome
// ============================================================================

/// Tally of a bulk action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub succeeded: usize,
    pub failed: usize,
}

impl BulkOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one item, alerting its failure with `prefix`
    pub fn record<T>(
        &mut self,
        result: &ConsoleResult<T>,
        prefix: &str,
        alerts: &mut impl Notify,
    ) -> bool {
        match result {
            Ok(_) => {
                self.succeeded += 1;
                true
            }
            Err(err) => {
                self.failed += 1;
                tracing::warn!("{}: {}", prefix, err);
                alerts.danger(failure_message(prefix, err));
                false
            }
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    /// Emit the summary alert; nothing is reported for an empty batch
    pub fn summarize(&self, success: &str, failure: &str, alerts: &mut impl Notify) {
        if self.total() == 0 {
            return;
        }
        if self.is_complete() {
            alerts.success(success);
        } else {
            alerts.danger(format!(
                "{} ({} of {} failed)",
                failure,
                self.failed,
                self.total()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kc_console_core::{AlertQueue, AlertVariant};

    #[test]
    fn test_failure_message_quotes_error() {
        let err = ConsoleError::api(409, "Client account already exists");
        assert_eq!(
            failure_message("Could not create client:", &err),
            "Could not create client: 'Request failed with status code 409: Client account already exists'"
        );
    }

    #[test]
    fn test_bulk_summary() {
        let mut alerts = AlertQueue::new();
        let mut outcome = BulkOutcome::new();
        outcome.record(&Ok::<(), ConsoleError>(()), "Error deleting group", &mut alerts);
        outcome.record(
            &Err::<(), _>(ConsoleError::api(404, "Could not find group")),
            "Error deleting group",
            &mut alerts,
        );
        outcome.summarize("Groups deleted", "Could not delete groups", &mut alerts);

        assert_eq!(outcome.total(), 2);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts.alerts()[0].variant, AlertVariant::Danger);
        assert_eq!(
            alerts.last().map(|a| a.message.as_str()),
            Some("Could not delete groups (1 of 2 failed)")
        );
    }

    #[test]
    fn test_empty_bulk_is_silent() {
        let mut alerts = AlertQueue::new();
        BulkOutcome::new().summarize("done", "failed", &mut alerts);
        assert!(alerts.is_empty());
    }
}
