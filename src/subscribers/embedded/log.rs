//! # LogWriter - grade event writer
//!
//! A minimal subscriber that turns every pushed grade into a `tracing` event.
//! Use it for demos or to trace a subject while debugging.
//!
//! ## Example output (with `tracing_subscriber::fmt`)
//! ```text
//! INFO gradecast::subscribers::embedded::log: grade pushed grade=42 seq=1
//! INFO gradecast::subscribers::embedded::log: grade pushed grade=87 seq=2
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crate::Grade;
use crate::error::UpdateError;
use crate::subscribers::Subscribe;

/// Grade writer subscriber.
#[derive(Debug, Default)]
pub struct LogWriter {
    seen: AtomicU64,
}

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of grades written so far.
    pub fn seen(&self) -> u64 {
        self.seen.load(Ordering::Relaxed)
    }
}

impl Subscribe for LogWriter {
    fn on_update(&self, grade: Grade) -> Result<(), UpdateError> {
        let seq = self.seen.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(grade, seq, "grade pushed");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_written_grades() {
        let w = LogWriter::new();
        w.on_update(1).unwrap();
        w.on_update(2).unwrap();
        assert_eq!(w.seen(), 2);
    }
}
