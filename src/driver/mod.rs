//! Driving loop: turns external triggers into grade pushes.
//!
//! The core never decides *when* a grade is produced. A [`Driver`] listens to
//! a stream of [`Command`]s (key presses, timer ticks, anything that can be
//! made into a `Stream`), draws a grade from a
//! [`GradeSource`](crate::GradeSource) and calls
//! [`Subject::set_value`](crate::Subject::set_value).
//!
//! ## Architecture
//! ```text
//! triggers (Stream<Command>) ──► Driver::run ──► source.next_grade() ──► subject.set_value(v)
//!                                      │                                        │
//!                                      └── CancellationToken                    └─► on_pass(&PassReport)
//! ```

mod runner;
mod shutdown;

pub use runner::{Command, Driver, DriverSummary, StopReason, ticks};
pub use shutdown::cancel_on_signal;
