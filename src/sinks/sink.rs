//! # Failure sink trait.
//!
//! Provides [`FailureSink`], the extension point that receives one report per
//! faulty subscriber call. The sink is the only user-visible effect of a
//! subscriber fault; `invoke` itself never fails.
//!
//! ## Architecture
//! ```text
//! Channel::invoke ──► catch_unwind(subscriber) ──► Err / panic
//!                                                     │
//!                                                     ▼
//!                               sinks::report(Failure { channel, subscriber, error })
//!                                                     │
//!                                                     ▼
//!                                        active FailureSink::report()
//! ```
//!
//! ## Rules
//! - Sinks are called from whichever thread ran `invoke`, possibly many at once.
//! - Sinks should be cheap and non-blocking; the dispatch waits for them.
//! - A panicking sink is contained; the report is lost and dispatch continues.

use std::fmt;

use crate::error::DispatchError;

/// One subscriber fault, as seen by a sink.
#[derive(Debug)]
pub struct Failure<'a> {
    /// Name of the channel being dispatched.
    pub channel: &'a str,
    /// Label of the faulty subscriber.
    pub subscriber: &'a str,
    /// What went wrong.
    pub error: &'a DispatchError,
}

impl fmt::Display for Failure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] subscriber '{}' {}: {}",
            self.channel,
            self.subscriber,
            self.error.as_label(),
            self.error.as_message()
        )
    }
}

/// Process-wide receiver of subscriber faults.
///
/// ### Implementation requirements
/// - Must be safe to call from several threads at once.
/// - Best effort: do not block, do not retry.
pub trait FailureSink: Send + Sync + 'static {
    /// Records a preformatted failure message.
    fn error(&self, message: &str);

    /// Records a structured failure.
    ///
    /// The default formats `failure` and forwards it to [`Self::error`]:
    /// `[channel] subscriber 'label' subscriber_panicked: panic: boom`.
    fn report(&self, failure: &Failure<'_>) {
        self.error(&failure.to_string());
    }

    /// Returns the sink name used in diagnostics.
    ///
    /// The default uses `type_name::<Self>()`.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
