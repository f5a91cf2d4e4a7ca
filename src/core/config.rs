//! # Subject configuration.
//!
//! Provides [`Config`] centralized settings for a [`Subject`](crate::Subject)
//! and the default grade generator.
//!
//! Config is used in two ways:
//! 1. **Subject creation**: `Subject::with_config(config)` / `Subject::builder(config)`
//! 2. **Generator defaults**: `RandomGrades::from_config(&config, seed)`
//!
//! ## Sentinel values
//! - `callback_budget = 0s` → unbounded (no budget check)
//! - `grade_min > grade_max` → bounds are swapped by [`Config::grade_range`]

use std::ops::RangeInclusive;
use std::time::Duration;

use crate::Grade;

/// Policy for an accumulator that would leave its integer range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Keep the sum inside `i64`; reject an update that would leave it.
    #[default]
    Reject,

    /// Accumulate in the full `i128` width; only reject on `i128` overflow.
    Widen,
}

/// Configuration for a subject and its notification passes.
///
/// ## Field semantics
/// - `callback_budget`: Per-callback time budget (`0s` = unbounded)
/// - `evict_slow`: Unregister subscribers that exceed the budget
/// - `catch_panics`: Isolate panicking subscribers from the rest of the pass
/// - `grade_min` / `grade_max`: Closed range for generated grades
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum time a single `on_update` call may take before it is reported.
    ///
    /// Callbacks are synchronous and cannot be preempted; an overrun is
    /// reported as `DeliveryError::BudgetExceeded` after the callback returns.
    pub callback_budget: Duration,

    /// Unregister a subscriber after a pass in which it exceeded the budget.
    ///
    /// Has no effect when `callback_budget` is zero.
    pub evict_slow: bool,

    /// Catch panics raised by subscribers and report them as
    /// `DeliveryError::Panicked` instead of unwinding through `set_value`.
    ///
    /// When off, a panic leaves `set_value` before the rest of the snapshot is
    /// visited and no `PassReport` is produced. The subject stays usable.
    pub catch_panics: bool,

    /// Lowest generated grade (inclusive).
    pub grade_min: Grade,

    /// Highest generated grade (inclusive).
    pub grade_max: Grade,
}

impl Config {
    /// Returns the callback budget as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(d)` → each callback is measured against `d`
    #[inline]
    pub fn budget(&self) -> Option<Duration> {
        if self.callback_budget == Duration::ZERO {
            None
        } else {
            Some(self.callback_budget)
        }
    }

    /// Returns the generator range with bounds ordered.
    #[inline]
    pub fn grade_range(&self) -> RangeInclusive<Grade> {
        if self.grade_min <= self.grade_max {
            self.grade_min..=self.grade_max
        } else {
            self.grade_max..=self.grade_min
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `callback_budget = 0s` (unbounded)
    /// - `evict_slow = false`
    /// - `catch_panics = true`
    /// - `grade_min = 1`, `grade_max = 100`
    fn default() -> Self {
        Self {
            callback_budget: Duration::ZERO,
            evict_slow: false,
            catch_panics: true,
            grade_min: 1,
            grade_max: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_is_unbounded() {
        let cfg = Config::default();
        assert_eq!(cfg.budget(), None);

        let cfg = Config {
            callback_budget: Duration::from_millis(5),
            ..Config::default()
        };
        assert_eq!(cfg.budget(), Some(Duration::from_millis(5)));
    }

    #[test]
    fn test_grade_range_orders_bounds() {
        assert_eq!(Config::default().grade_range(), 1..=100);

        let cfg = Config {
            grade_min: 50,
            grade_max: 10,
            ..Config::default()
        };
        assert_eq!(cfg.grade_range(), 10..=50);
    }
}
