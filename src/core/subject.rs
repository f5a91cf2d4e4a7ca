//! # Subject: authoritative grade holder and notification source.
//!
//! The [`Subject`] owns the current grade and a registry of non-owning
//! subscriber references. Every [`Subject::set_value`] call runs one
//! notification pass.
//!
//! ## Architecture
//! ```text
//! set_value(v)
//!   ├─► lock monitor
//!   │     ├─► value = Some(v), passes += 1
//!   │     └─► snapshot = registry.snapshot()   (strong refs, registration order)
//!   ├─► unlock
//!   ├─► dispatch::deliver(snapshot, v)          (no lock held)
//!   ├─► evict slow subscribers (if configured)
//!   └─► PassReport
//! ```
//!
//! ## State machine
//! ```text
//! Uninitialized ──set_value──► HasValue ──set_value──► HasValue
//! ```
//!
//! ## Rules
//! - `register` / `unregister` / snapshot-taking are mutually exclusive (one monitor).
//! - Dispatch runs without the monitor, over the snapshot:
//!   - membership changes made during a pass (by callbacks or other threads)
//!     apply to the **next** pass only;
//!   - a subscriber unregistered mid-pass still gets the current pass's value.
//! - A nested `set_value` from inside a callback runs a complete nested pass
//!   before the outer pass resumes.
//! - Concurrent `set_value` calls each deliver their own value from their own
//!   snapshot; passes from different threads may interleave.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::Grade;
use crate::core::builder::SubjectBuilder;
use crate::core::config::Config;
use crate::core::dispatch;
use crate::core::registry::{Registry, SubscriberId};
use crate::core::report::PassReport;
use crate::subscribers::Subscribe;

/// Externally visible state of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectState {
    /// No value has been set; nobody has been notified.
    Uninitialized,
    /// A value exists and was broadcast to the subscribers registered at the time.
    HasValue(Grade),
}

struct State {
    value: Option<Grade>,
    passes: u64,
    registry: Registry,
}

struct Inner {
    cfg: Config,
    state: Mutex<State>,
}

/// Holder of the current grade that pushes every update to its subscribers.
///
/// `Subject` is a cheap handle: clones share the same value and subscriber
/// set, so a subscriber may keep one to change membership from `on_update`.
///
/// The subject never owns its subscribers. Keep the `Arc` you registered;
/// once its last strong reference is dropped the subscriber is skipped and
/// pruned at the next pass.
#[derive(Clone)]
pub struct Subject {
    inner: Arc<Inner>,
}

impl Default for Subject {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Subject")
            .field("value", &state.value)
            .field("passes", &state.passes)
            .field("subscribers", &state.registry.names())
            .finish()
    }
}

impl Subject {
    /// Creates a subject with [`Config::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a subject with the given configuration.
    #[must_use]
    pub fn with_config(cfg: Config) -> Self {
        Self {
            inner: Arc::new(Inner {
                cfg,
                state: Mutex::new(State {
                    value: None,
                    passes: 0,
                    registry: Registry::default(),
                }),
            }),
        }
    }

    /// Returns a builder that can pre-register subscribers.
    pub fn builder(cfg: Config) -> SubjectBuilder {
        SubjectBuilder::new(cfg)
    }

    /// Configuration in effect.
    pub fn config(&self) -> &Config {
        &self.inner.cfg
    }

    /// Registers `sub`. Returns `false` if it was already registered.
    ///
    /// Registering twice has no further effect: the subscriber still gets
    /// exactly one call per pass.
    pub fn register<S: Subscribe>(&self, sub: &Arc<S>) -> bool {
        let sub: Arc<dyn Subscribe> = sub.clone();
        self.register_dyn(&sub)
    }

    /// Registers a type-erased subscriber. Returns `false` if already registered.
    pub fn register_dyn(&self, sub: &Arc<dyn Subscribe>) -> bool {
        let added = self.inner.state.lock().registry.insert(sub);
        tracing::debug!(subscriber = sub.name(), added, "register");
        added
    }

    /// Unregisters `sub`. Returns `false` if it was not registered.
    pub fn unregister<S: Subscribe + ?Sized>(&self, sub: &Arc<S>) -> bool {
        let removed = self
            .inner
            .state
            .lock()
            .registry
            .remove(SubscriberId::of(sub));
        tracing::debug!(subscriber = sub.name(), removed, "unregister");
        removed
    }

    /// True if `sub` is currently registered and alive.
    pub fn contains<S: Subscribe + ?Sized>(&self, sub: &Arc<S>) -> bool {
        self.inner
            .state
            .lock()
            .registry
            .contains(SubscriberId::of(sub))
    }

    /// Number of live registered subscribers.
    pub fn len(&self) -> usize {
        self.inner.state.lock().registry.len()
    }

    /// True if no live subscriber is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last value set, `None` before the first `set_value`.
    pub fn current_value(&self) -> Option<Grade> {
        self.inner.state.lock().value
    }

    /// Current state of the subject.
    pub fn state(&self) -> SubjectState {
        match self.current_value() {
            Some(v) => SubjectState::HasValue(v),
            None => SubjectState::Uninitialized,
        }
    }

    /// Number of passes started so far.
    pub fn passes(&self) -> u64 {
        self.inner.state.lock().passes
    }

    /// Stores `grade` and pushes it to every registered subscriber.
    ///
    /// Never fails: subscriber errors, panics and budget overruns are
    /// collected into the returned [`PassReport`] and logged.
    pub fn set_value(&self, grade: Grade) -> PassReport {
        let (pass, snapshot) = {
            let mut state = self.inner.state.lock();
            state.value = Some(grade);
            state.passes += 1;
            (state.passes, state.registry.snapshot())
        };
        tracing::debug!(pass, grade, recipients = snapshot.len(), "notify");

        self.notify(pass, grade, snapshot)
    }

    fn notify(
        &self,
        pass: u64,
        grade: Grade,
        snapshot: Vec<(SubscriberId, Arc<dyn Subscribe>)>,
    ) -> PassReport {
        let outcome = dispatch::deliver(&self.inner.cfg, &snapshot, grade);

        let mut evicted = Vec::new();
        if self.inner.cfg.evict_slow && !outcome.slow.is_empty() {
            let mut state = self.inner.state.lock();
            for (id, name) in &outcome.slow {
                if state.registry.remove(*id) {
                    evicted.push(*name);
                }
            }
        }

        let report = PassReport {
            pass,
            value: grade,
            recipients: snapshot.len(),
            failures: outcome.failures,
            evicted,
        };
        report.log_failures();
        report
    }
}
