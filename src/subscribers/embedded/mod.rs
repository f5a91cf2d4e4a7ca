//! # Built-in subscribers
//!
//! Small, self-contained implementations useful for demos.
//!
//! - [`LogWriter`]: writes each grade as a `tracing` event (demo/debug).

mod log;

pub use log::LogWriter;
