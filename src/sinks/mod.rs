//! # Failure sinks.
//!
//! A subscriber that panics or returns an error must not stop the rest of a
//! dispatch and must not surface to the `invoke` caller. Instead the channel
//! builds a [`Failure`] and hands it to the process-wide active sink.
//!
//! ## Contents
//! - [`FailureSink`], [`Failure`]: the collaborator interface and its report record
//! - [`install`], [`install_arc`], [`uninstall`], [`active`], [`scoped`]:
//!   lifecycle of the active sink
//! - [`CollectingSink`], `LogSink` (feature `logging`): built-in sinks
//!
//! ## Example
//! ```rust
//! use ordcast::sinks::{self, CollectingSink};
//! use ordcast::{Channel, Signal};
//!
//! let sink = CollectingSink::new();
//! let _guard = sinks::scoped(sink.clone());
//!
//! let ch: Channel<Signal> = Channel::new("tick");
//! ch.subscribe_fn(|| panic!("bad handler"), 0);
//! ch.invoke(());
//!
//! assert_eq!(sink.channels(), vec!["tick"]);
//! ```

mod embedded;
mod global;
mod sink;

pub use embedded::{CollectingSink, FailureRecord};
#[cfg(feature = "logging")]
pub use embedded::LogSink;
pub use global::{active, install, install_arc, is_installed, scoped, uninstall, SinkGuard};
pub use sink::{Failure, FailureSink};

pub(crate) use global::report;
