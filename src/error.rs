//! Error types used by the subject, its subscribers and derived statistics.
//!
//! This module defines three enums:
//!
//! - [`StatError`] - a derived statistic cannot be produced or updated.
//! - [`UpdateError`] - a subscriber refused or failed to apply a pushed value.
//! - [`DeliveryError`] - one failed delivery inside a notification pass.
//!
//! All of them provide `as_label` / `as_message` helpers for logs.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by derived statistics.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatError {
    /// No value has been pushed yet, so the statistic is undefined.
    #[error("no data yet")]
    NoData,

    /// Accumulating `value` would leave the accumulator range.
    ///
    /// The update is rejected; the previous state is kept.
    #[error("accumulator overflow: sum={sum} count={count} value={value}")]
    Overflow {
        /// Number of values accumulated before the rejected one.
        count: u64,
        /// Sum accumulated before the rejected one.
        sum: i128,
        /// The rejected value.
        value: i64,
    },
}

impl StatError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use gradecast::StatError;
    ///
    /// assert_eq!(StatError::NoData.as_label(), "stat_no_data");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StatError::NoData => "stat_no_data",
            StatError::Overflow { .. } => "stat_overflow",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            StatError::NoData => "no value pushed yet".to_string(),
            StatError::Overflow { count, sum, value } => {
                format!("overflow adding {value} to sum={sum} after {count} values")
            }
        }
    }
}

/// # Errors a subscriber may return from `on_update`.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// The derived statistic rejected the value.
    #[error(transparent)]
    Stat(#[from] StatError),

    /// The subscriber's downstream sink is gone.
    #[error("downstream closed")]
    Closed,

    /// Any other failure, described by the subscriber.
    #[error("update failed: {reason}")]
    Failed {
        /// Subscriber-provided reason.
        reason: String,
    },
}

impl UpdateError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            UpdateError::Stat(e) => e.as_label(),
            UpdateError::Closed => "update_closed",
            UpdateError::Failed { .. } => "update_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            UpdateError::Stat(e) => e.as_message(),
            UpdateError::Closed => "downstream closed".to_string(),
            UpdateError::Failed { reason } => format!("failed: {reason}"),
        }
    }
}

/// # One failed delivery inside a notification pass.
///
/// Failures never abort the pass: they are collected into
/// [`PassReport::failures`](crate::PassReport) and reported after every
/// subscriber in the snapshot has been visited.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The subscriber returned an error from `on_update`.
    #[error("subscriber '{subscriber}' rejected update: {source}")]
    Rejected {
        /// Subscriber name.
        subscriber: &'static str,
        /// Error returned by the subscriber.
        source: UpdateError,
    },

    /// The subscriber panicked inside `on_update`.
    #[error("subscriber '{subscriber}' panicked: {info}")]
    Panicked {
        /// Subscriber name.
        subscriber: &'static str,
        /// Panic payload rendered as text.
        info: String,
    },

    /// The callback ran longer than the configured budget.
    ///
    /// The value was delivered; the report only flags the slow subscriber.
    #[error("subscriber '{subscriber}' took {elapsed:?} (budget {budget:?})")]
    BudgetExceeded {
        /// Subscriber name.
        subscriber: &'static str,
        /// Observed callback duration.
        elapsed: Duration,
        /// Configured budget.
        budget: Duration,
    },
}

impl DeliveryError {
    /// Name of the subscriber the failure belongs to.
    pub fn subscriber(&self) -> &'static str {
        match self {
            DeliveryError::Rejected { subscriber, .. }
            | DeliveryError::Panicked { subscriber, .. }
            | DeliveryError::BudgetExceeded { subscriber, .. } => *subscriber,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use gradecast::DeliveryError;
    ///
    /// let err = DeliveryError::Panicked { subscriber: "avg", info: "boom".into() };
    /// assert_eq!(err.as_label(), "delivery_panicked");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DeliveryError::Rejected { .. } => "delivery_rejected",
            DeliveryError::Panicked { .. } => "delivery_panicked",
            DeliveryError::BudgetExceeded { .. } => "delivery_budget_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DeliveryError::Rejected { subscriber, source } => {
                format!("{subscriber}: {}", source.as_message())
            }
            DeliveryError::Panicked { subscriber, info } => {
                format!("{subscriber}: panic: {info}")
            }
            DeliveryError::BudgetExceeded {
                subscriber,
                elapsed,
                budget,
            } => format!("{subscriber}: {elapsed:?} > {budget:?}"),
        }
    }
}
