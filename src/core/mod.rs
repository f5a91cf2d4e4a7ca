//! Notification core: subject, membership and dispatch.
//!
//! The only public types from this module are [`Subject`], its builder,
//! configuration and the per-pass report.
//!
//! Internal modules:
//! - [`registry`]: ordered, duplicate-free set of weak subscriber references;
//! - [`dispatch`]: delivers one value over a snapshot with panic isolation and budget checks;
//! - [`subject`]: owns the value, takes snapshots, runs passes;
//! - [`report`]: outcome of a pass;
//! - [`config`]: subject settings.

mod builder;
mod config;
mod dispatch;
mod registry;
mod report;
mod subject;

pub use builder::SubjectBuilder;
pub use config::{Config, OverflowPolicy};
pub use registry::SubscriberId;
pub use report::PassReport;
pub use subject::{Subject, SubjectState};
