//! # LogSink: failure reports through `log`
//!
//! Forwards every subscriber fault to `log::error!` under the `ordcast`
//! target. The process picks the logger backend; nothing is printed until
//! one is initialized.
//!
//! ## Example output
//! ```text
//! ERROR ordcast: [inventory-changed] subscriber 'hud' subscriber_panicked: panic: index out of bounds
//! ERROR ordcast: [save-requested] subscriber 'cloud' subscriber_failed: error: timed out
//! ```

use crate::sinks::FailureSink;

/// Failure sink writing to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl LogSink {
    /// Construct a new [`LogSink`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FailureSink for LogSink {
    fn error(&self, message: &str) {
        log::error!(target: "ordcast", "{message}");
    }

    fn name(&self) -> &'static str {
        "LogSink"
    }
}
