//! # Most recent grade.

use std::fmt;

use parking_lot::Mutex;

use crate::Grade;
use crate::error::{StatError, UpdateError};
use crate::subscribers::Subscribe;

/// Subscriber that remembers only the last grade it received.
#[derive(Debug, Default)]
pub struct LatestValueSubscriber {
    last: Mutex<Option<Grade>>,
}

impl LatestValueSubscriber {
    /// Creates a subscriber with no value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last received grade, `None` before the first one.
    pub fn latest_value(&self) -> Option<Grade> {
        *self.last.lock()
    }

    /// Last received grade, or `StatError::NoData` before the first one.
    pub fn latest(&self) -> Result<Grade, StatError> {
        self.latest_value().ok_or(StatError::NoData)
    }
}

impl Subscribe for LatestValueSubscriber {
    fn on_update(&self, grade: Grade) -> Result<(), UpdateError> {
        *self.last.lock() = Some(grade);
        tracing::debug!(grade, "latest updated");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "latest"
    }
}

impl fmt::Display for LatestValueSubscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.latest_value() {
            Some(grade) => write!(f, "The current grade is: {grade}"),
            None => write!(f, "The current grade is: no grades yet"),
        }
    }
}
