//! # Outcome of one notification pass.

use crate::Grade;
use crate::error::DeliveryError;

/// What happened during one `Subject::set_value` call.
///
/// `set_value` never fails; subscriber failures are collected here after
/// every subscriber in the snapshot has been called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// 1-based pass number on this subject.
    pub pass: u64,
    /// The pushed value.
    pub value: Grade,
    /// Number of subscribers in the snapshot (each got exactly one call).
    pub recipients: usize,
    /// Failures collected during the pass, in delivery order.
    pub failures: Vec<DeliveryError>,
    /// Subscribers unregistered after the pass for exceeding the budget.
    pub evicted: Vec<&'static str>,
}

impl PassReport {
    /// True if every call returned `Ok` within budget.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of calls that applied the value (returned `Ok`).
    ///
    /// A budget overrun still counts as applied.
    pub fn delivered(&self) -> usize {
        let failed = self
            .failures
            .iter()
            .filter(|f| {
                matches!(
                    f,
                    DeliveryError::Rejected { .. } | DeliveryError::Panicked { .. }
                )
            })
            .count();
        self.recipients.saturating_sub(failed)
    }

    /// Names of subscribers with at least one failure, deduplicated.
    pub fn failed_subscribers(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for f in &self.failures {
            if !names.contains(&f.subscriber()) {
                names.push(f.subscriber());
            }
        }
        names
    }

    /// Writes each failure to the log.
    pub(crate) fn log_failures(&self) {
        for f in &self.failures {
            tracing::warn!(
                pass = self.pass,
                value = self.value,
                subscriber = f.subscriber(),
                label = f.as_label(),
                "{}",
                f.as_message()
            );
        }
        for name in &self.evicted {
            tracing::warn!(pass = self.pass, subscriber = name, "evicted slow subscriber");
        }
    }
}
