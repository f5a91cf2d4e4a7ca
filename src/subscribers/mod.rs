//! # Grade subscribers.
//!
//! This module provides the [`Subscribe`] trait and the built-in derived views
//! that a [`Subject`](crate::Subject) pushes grades to.
//!
//! ## Architecture
//! ```text
//! Subject::set_value(v) ──► snapshot ──► Subscribe::on_update(v)
//!                                              │
//!                               ┌──────────────┼──────────────┬──────────┐
//!                               ▼              ▼              ▼          ▼
//!                        AverageSubscriber  LatestValue  ChannelSub  LogWriter
//! ```
//!
//! ## Subscriber types
//! - **Stateful subscribers** - derive a view that renderers query after a pass
//!   ([`AverageSubscriber`], [`LatestValueSubscriber`])
//! - **Forwarding subscribers** - hand values to another consumer
//!   ([`ChannelSubscriber`], `LogWriter`)

mod average;
mod channel;
#[cfg(feature = "logging")]
mod embedded;
mod latest;
mod subscribe;

pub use average::{AverageSubscriber, RunningAverage};
pub use channel::ChannelSubscriber;
#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use latest::LatestValueSubscriber;
pub use subscribe::Subscribe;
