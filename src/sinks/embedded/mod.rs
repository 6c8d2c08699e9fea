//! Built-in failure sinks.
//!
//! - [`CollectingSink`]: keeps every report in memory (tests, diagnostics overlays).
//! - [`LogSink`]: forwards reports to the `log` facade (feature `logging`).

mod collect;
#[cfg(feature = "logging")]
mod log;

pub use self::collect::{CollectingSink, FailureRecord};
#[cfg(feature = "logging")]
pub use self::log::LogSink;
