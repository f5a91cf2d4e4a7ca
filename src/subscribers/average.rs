//! # Running average of pushed grades.
//!
//! [`RunningAverage`] is the pure accumulator (no locking), and
//! [`AverageSubscriber`] wraps it for registration with a subject.
//!
//! ## Rules
//! - The average is `sum / count`, truncated toward zero.
//! - Before the first value the average is undefined (`StatError::NoData`),
//!   never zero.
//! - Overflow follows [`OverflowPolicy`]; a rejected value leaves the state untouched.

use std::fmt;

use parking_lot::Mutex;

use crate::Grade;
use crate::core::OverflowPolicy;
use crate::error::{StatError, UpdateError};
use crate::subscribers::Subscribe;

/// Count and sum of every accepted value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunningAverage {
    count: u64,
    sum: i128,
    policy: OverflowPolicy,
}

impl RunningAverage {
    /// Creates an empty accumulator with the given overflow policy.
    pub fn new(policy: OverflowPolicy) -> Self {
        Self {
            count: 0,
            sum: 0,
            policy,
        }
    }

    /// Accumulates `value`.
    ///
    /// Returns `StatError::Overflow` and keeps the previous state when the new
    /// sum (or count) would leave the range allowed by the policy.
    pub fn push(&mut self, value: Grade) -> Result<(), StatError> {
        let overflow = || StatError::Overflow {
            count: self.count,
            sum: self.sum,
            value,
        };

        let sum = self
            .sum
            .checked_add(i128::from(value))
            .ok_or_else(overflow)?;
        if self.policy == OverflowPolicy::Reject && i64::try_from(sum).is_err() {
            return Err(overflow());
        }
        let count = self.count.checked_add(1).ok_or_else(overflow)?;

        self.sum = sum;
        self.count = count;
        Ok(())
    }

    /// Truncated mean, or `StatError::NoData` before the first value.
    pub fn average(&self) -> Result<i64, StatError> {
        if self.count == 0 {
            return Err(StatError::NoData);
        }
        // |sum / count| <= max |value|, so the mean always fits in i64.
        let mean = self.sum / i128::from(self.count);
        i64::try_from(mean).map_err(|_| StatError::Overflow {
            count: self.count,
            sum: self.sum,
            value: 0,
        })
    }

    /// Number of accepted values.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of accepted values.
    pub fn sum(&self) -> i128 {
        self.sum
    }

    /// Overflow policy in effect.
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }
}

/// Subscriber that keeps a running average of every grade it receives.
#[derive(Debug, Default)]
pub struct AverageSubscriber {
    state: Mutex<RunningAverage>,
}

impl AverageSubscriber {
    /// Creates a subscriber with the default ([`OverflowPolicy::Reject`]) policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a subscriber with an explicit overflow policy.
    #[must_use]
    pub fn with_policy(policy: OverflowPolicy) -> Self {
        Self {
            state: Mutex::new(RunningAverage::new(policy)),
        }
    }

    /// Current average, `None` before the first grade.
    pub fn current_average(&self) -> Option<i64> {
        self.state.lock().average().ok()
    }

    /// Current average, or `StatError::NoData` before the first grade.
    pub fn average(&self) -> Result<i64, StatError> {
        self.state.lock().average()
    }

    /// Number of grades received.
    pub fn count(&self) -> u64 {
        self.state.lock().count()
    }

    /// Sum of grades received.
    pub fn sum(&self) -> i128 {
        self.state.lock().sum()
    }

    /// Copy of the accumulator.
    pub fn snapshot(&self) -> RunningAverage {
        self.state.lock().clone()
    }
}

impl Subscribe for AverageSubscriber {
    fn on_update(&self, grade: Grade) -> Result<(), UpdateError> {
        let mut state = self.state.lock();
        state.push(grade)?;
        tracing::debug!(
            grade,
            count = state.count(),
            average = ?state.average().ok(),
            "average updated"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "average"
    }
}

impl fmt::Display for AverageSubscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current_average() {
            Some(avg) => write!(f, "The average grade is: {avg}"),
            None => write!(f, "The average grade is: no grades yet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_data_before_first_push() {
        let avg = RunningAverage::default();
        assert_eq!(avg.average(), Err(StatError::NoData));
        assert_eq!(avg.count(), 0);
    }

    #[test]
    fn test_mean_truncates_toward_zero() {
        let mut avg = RunningAverage::default();
        avg.push(10).unwrap();
        avg.push(11).unwrap();
        assert_eq!(avg.average(), Ok(10));

        let mut neg = RunningAverage::default();
        neg.push(-10).unwrap();
        neg.push(-11).unwrap();
        // -21 / 2 = -10.5 → -10, not -11
        assert_eq!(neg.average(), Ok(-10));
    }

    #[test]
    fn test_matches_reference_mean_for_sequences() {
        let sequences: [&[i64]; 4] = [&[7], &[1, 2], &[100, 1, 1, 1], &[-5, 3, 9, -2, 0, 13]];
        for seq in sequences {
            let mut avg = RunningAverage::default();
            for &v in seq {
                avg.push(v).unwrap();
            }
            let expected = seq.iter().sum::<i64>() / seq.len() as i64;
            assert_eq!(avg.average(), Ok(expected), "sequence {seq:?}");
        }
    }

    #[test]
    fn test_reject_policy_keeps_state_on_overflow() {
        let mut avg = RunningAverage::new(OverflowPolicy::Reject);
        avg.push(i64::MAX).unwrap();

        let err = avg.push(1).unwrap_err();
        assert_eq!(
            err,
            StatError::Overflow {
                count: 1,
                sum: i128::from(i64::MAX),
                value: 1
            }
        );
        assert_eq!(avg.count(), 1);
        assert_eq!(avg.average(), Ok(i64::MAX));
    }

    #[test]
    fn test_widen_policy_accepts_sums_beyond_i64() {
        let mut avg = RunningAverage::new(OverflowPolicy::Widen);
        avg.push(i64::MAX).unwrap();
        avg.push(i64::MAX).unwrap();
        avg.push(i64::MAX).unwrap();

        assert_eq!(avg.sum(), 3 * i128::from(i64::MAX));
        assert_eq!(avg.average(), Ok(i64::MAX));
    }

    #[test]
    fn test_subscriber_reports_overflow_as_update_error() {
        let sub = AverageSubscriber::new();
        sub.on_update(i64::MAX).unwrap();
        let err = sub.on_update(i64::MAX).unwrap_err();
        assert_eq!(err.as_label(), "stat_overflow");
        assert_eq!(sub.count(), 1);
    }

    #[test]
    fn test_display_renders_current_state() {
        let sub = AverageSubscriber::new();
        assert_eq!(sub.to_string(), "The average grade is: no grades yet");
        sub.on_update(10).unwrap();
        sub.on_update(20).unwrap();
        assert_eq!(sub.to_string(), "The average grade is: 15");
    }

    proptest! {
        #[test]
        fn prop_average_is_truncated_mean_of_every_prefix(
            values in proptest::collection::vec(-1_000_000_000_000i64..=1_000_000_000_000, 1..64)
        ) {
            let sub = AverageSubscriber::new();
            let mut sum = 0i64;
            for (n, &v) in values.iter().enumerate() {
                prop_assert!(sub.on_update(v).is_ok());
                sum += v;
                prop_assert_eq!(sub.average(), Ok(sum / (n as i64 + 1)));
            }
            prop_assert_eq!(sub.count(), values.len() as u64);
            prop_assert_eq!(sub.sum(), i128::from(sum));
        }
    }
}
