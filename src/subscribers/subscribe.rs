//! # Subscriber trait.
//!
//! Provides [`Subscribe`] the extension point for plugging derived views into a
//! [`Subject`](crate::Subject).
//!
//! Each subscriber gets:
//! - **Synchronous delivery** (called from inside `Subject::set_value`)
//! - **Exactly one call per pass** it was registered for at pass start
//! - **Panic isolation** (panics are caught and reported as `DeliveryError::Panicked`)
//!
//! ## Architecture
//! ```text
//! Subject::set_value(v) ──► snapshot ──► subscriber.on_update(v) ──► Ok / Err
//!                                                                  └─► panic caught → DeliveryError::Panicked
//! ```
//!
//! ## Rules
//! - A failing subscriber never stops delivery to the others.
//! - Calls happen in registration order within a pass.
//! - `on_update` may register/unregister subscribers on the same subject;
//!   the change applies from the next pass.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicI64, Ordering};
//! use gradecast::{Grade, Subscribe, UpdateError};
//!
//! #[derive(Default)]
//! struct MaxGrade(AtomicI64);
//!
//! impl Subscribe for MaxGrade {
//!     fn on_update(&self, grade: Grade) -> Result<(), UpdateError> {
//!         self.0.fetch_max(grade, Ordering::Relaxed);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str { "max" }
//! }
//! ```

use crate::Grade;
use crate::error::UpdateError;

/// Receiver of pushed grades.
///
/// ### Implementation requirements
/// - Keep callbacks short; they run inside the publisher's call.
/// - Return an error instead of panicking when an update cannot be applied.
/// - Derived state should be readable through `&self` queries so renderers
///   can read it after a pass.
pub trait Subscribe: Send + Sync + 'static {
    /// Applies a single pushed value.
    ///
    /// Errors are collected into the pass report; the pass continues.
    fn on_update(&self, grade: Grade) -> Result<(), UpdateError>;

    /// Returns the subscriber name used in logs and delivery errors.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
