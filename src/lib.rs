//! # gradecast
//!
//! **gradecast** is a small push-based notification core: one [`Subject`]
//! holds the current grade and pushes every update, synchronously, to a
//! dynamic set of subscribers that derive their own view of it.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Command    │   │   Command    │   │   Command    │
//!     │ (key / tick) │   │ (key / tick) │   │  (Graduate)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Driver (trigger loop)                                            │
//! │  - GradeSource (RandomGrades / ScriptedGrades)                    │
//! │  - CancellationToken (shutdown)                                   │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼ set_value(v)
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Subject                                                          │
//! │  - value: Option<Grade>                                           │
//! │  - Registry (weak refs, registration order, no duplicates)        │
//! │  - snapshot at pass start, dispatch without the lock              │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               ▼
//!   AverageSubscriber  LatestValueSubscriber  ChannelSubscriber  ...
//!        │                  │                  │
//!        └──────────────────┴─────► PassReport (failures collected)
//! ```
//!
//! ### Pass lifecycle
//! ```text
//! set_value(v)
//!   ├─► value = v, passes += 1, snapshot subscribers   (under one lock)
//!   ├─► for each subscriber in snapshot:
//!   │       on_update(v)
//!   │         ├─ Ok       ──► delivered
//!   │         ├─ Err(e)   ──► DeliveryError::Rejected
//!   │         ├─ panic    ──► DeliveryError::Panicked   (caught)
//!   │         └─ too slow ──► DeliveryError::BudgetExceeded
//!   └─► PassReport { pass, value, recipients, failures, evicted }
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                              |
//! |-------------------|-----------------------------------------------------------|-------------------------------------------------|
//! | **Subject**       | Holds the grade, manages membership, runs passes.         | [`Subject`], [`SubjectState`], [`PassReport`]   |
//! | **Subscriber API**| Derive views from pushed grades.                          | [`Subscribe`]                                   |
//! | **Built-ins**     | Running average, latest value, channel forwarder.         | [`AverageSubscriber`], [`LatestValueSubscriber`]|
//! | **Sources**       | Injectable, seedable grade generators.                    | [`GradeSource`], [`RandomGrades`]               |
//! | **Driver**        | Async trigger loop with cancellation.                     | [`Driver`], [`Command`]                         |
//! | **Errors**        | Typed errors for statistics and deliveries.               | [`StatError`], [`DeliveryError`]                |
//! | **Configuration** | Callback budget, panic isolation, grade range.            | [`Config`]                                      |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use gradecast::{AverageSubscriber, LatestValueSubscriber, Subject};
//!
//! let subject = Subject::new();
//! let average = Arc::new(AverageSubscriber::new());
//! let latest = Arc::new(LatestValueSubscriber::new());
//! subject.register(&average);
//! subject.register(&latest);
//!
//! for grade in [10, 20, 30] {
//!     let report = subject.set_value(grade);
//!     assert!(report.is_clean());
//! }
//!
//! assert_eq!(average.current_average(), Some(20));
//! assert_eq!(latest.latest_value(), Some(30));
//! ```
mod core;
mod driver;
mod error;
mod source;
mod subscribers;

/// Value pushed from a subject to its subscribers.
pub type Grade = i64;

// ---- Public re-exports ----

pub use core::{
    Config, OverflowPolicy, PassReport, Subject, SubjectBuilder, SubjectState, SubscriberId,
};
pub use driver::{Command, Driver, DriverSummary, StopReason, cancel_on_signal, ticks};
pub use error::{DeliveryError, StatError, UpdateError};
pub use source::{GradeSource, RandomGrades, ScriptedGrades};
pub use subscribers::{
    AverageSubscriber, ChannelSubscriber, LatestValueSubscriber, RunningAverage, Subscribe,
};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
