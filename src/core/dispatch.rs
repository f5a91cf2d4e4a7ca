//! # Synchronous fan-out of one value over a subscriber snapshot.
//!
//! ## What it guarantees
//! - Every subscriber in the snapshot is called exactly once, in snapshot order.
//! - A subscriber returning `Err` or panicking does not stop the pass.
//! - Panics are caught (when `Config::catch_panics` is set) and reported.
//!
//! ## What it does **not** guarantee
//! - No preemption: a slow callback still runs to completion; the budget is
//!   checked after it returns.
//!
//! ## Diagram
//! ```text
//!    deliver(snapshot, v)
//!        ├──► S1.on_update(v) ──► Ok
//!        ├──► S2.on_update(v) ──► Err      → DeliveryError::Rejected
//!        ├──► S3.on_update(v) ──► panic    → DeliveryError::Panicked
//!        └──► SN.on_update(v) ──► Ok (slow) → DeliveryError::BudgetExceeded
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use crate::Grade;
use crate::core::config::Config;
use crate::core::registry::SubscriberId;
use crate::error::{DeliveryError, UpdateError};
use crate::subscribers::Subscribe;

/// Result of delivering one value to a snapshot.
#[derive(Debug, Default)]
pub(crate) struct Outcome {
    pub(crate) failures: Vec<DeliveryError>,
    /// Subscribers that exceeded the callback budget.
    pub(crate) slow: Vec<(SubscriberId, &'static str)>,
}

/// Calls `on_update(grade)` on every subscriber in `snapshot`.
pub(crate) fn deliver(
    cfg: &Config,
    snapshot: &[(SubscriberId, Arc<dyn Subscribe>)],
    grade: Grade,
) -> Outcome {
    let budget = cfg.budget();
    let mut out = Outcome::default();

    for (id, sub) in snapshot {
        let name = sub.name();
        let started = budget.map(|_| Instant::now());

        match call(cfg.catch_panics, sub.as_ref(), grade) {
            Ok(Ok(())) => tracing::trace!(subscriber = name, grade, "delivered"),
            Ok(Err(source)) => out.failures.push(DeliveryError::Rejected {
                subscriber: name,
                source,
            }),
            Err(info) => out.failures.push(DeliveryError::Panicked {
                subscriber: name,
                info,
            }),
        }

        if let (Some(budget), Some(started)) = (budget, started) {
            let elapsed = started.elapsed();
            if elapsed > budget {
                out.failures.push(DeliveryError::BudgetExceeded {
                    subscriber: name,
                    elapsed,
                    budget,
                });
                out.slow.push((*id, name));
            }
        }
    }
    out
}

/// Runs one callback; `Err(info)` if it panicked and panics are caught.
fn call(
    catch_panics: bool,
    sub: &dyn Subscribe,
    grade: Grade,
) -> Result<Result<(), UpdateError>, String> {
    if !catch_panics {
        return Ok(sub.on_update(grade));
    }
    panic::catch_unwind(AssertUnwindSafe(|| sub.on_update(grade))).map_err(|panic_err| {
        let any = &*panic_err;
        if let Some(msg) = any.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = any.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Counting(AtomicUsize);

    impl Subscribe for Counting {
        fn on_update(&self, _grade: Grade) -> Result<(), UpdateError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn name(&self) -> &'static str {
            "counting"
        }
    }

    struct Panicking;

    impl Subscribe for Panicking {
        fn on_update(&self, grade: Grade) -> Result<(), UpdateError> {
            panic!("bad grade {grade}");
        }
        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    struct Slow(Duration);

    impl Subscribe for Slow {
        fn on_update(&self, _grade: Grade) -> Result<(), UpdateError> {
            std::thread::sleep(self.0);
            Ok(())
        }
        fn name(&self) -> &'static str {
            "slow"
        }
    }

    fn entry<S: Subscribe>(sub: &Arc<S>) -> (SubscriberId, Arc<dyn Subscribe>) {
        let sub: Arc<dyn Subscribe> = sub.clone();
        (SubscriberId::of(&sub), sub)
    }

    #[test]
    fn test_panic_does_not_abort_pass() {
        let before = Arc::new(Counting(AtomicUsize::new(0)));
        let after = Arc::new(Counting(AtomicUsize::new(0)));
        let snapshot = vec![entry(&before), entry(&Arc::new(Panicking)), entry(&after)];

        let out = deliver(&Config::default(), &snapshot, 42);

        assert_eq!(before.0.load(Ordering::SeqCst), 1);
        assert_eq!(after.0.load(Ordering::SeqCst), 1);
        assert_eq!(
            out.failures,
            vec![DeliveryError::Panicked {
                subscriber: "panicking",
                info: "bad grade 42".into()
            }]
        );
    }

    #[test]
    fn test_budget_overrun_is_reported_after_delivery() {
        let cfg = Config {
            callback_budget: Duration::from_millis(1),
            ..Config::default()
        };
        let slow = Arc::new(Slow(Duration::from_millis(20)));
        let snapshot = vec![entry(&slow)];

        let out = deliver(&cfg, &snapshot, 1);

        assert_eq!(out.slow.len(), 1);
        assert!(matches!(
            out.failures.as_slice(),
            [DeliveryError::BudgetExceeded { subscriber: "slow", .. }]
        ));
    }

    #[test]
    fn test_no_budget_means_no_timing_failures() {
        let slow = Arc::new(Slow(Duration::from_millis(5)));
        let out = deliver(&Config::default(), &[entry(&slow)], 1);
        assert!(out.failures.is_empty());
        assert!(out.slow.is_empty());
    }
}
