//! Error types produced while dispatching to subscribers.
//!
//! [`DispatchError`] is the only error this crate ever constructs. It never
//! reaches an `invoke` caller: it is built at per-subscriber granularity and
//! handed to the active failure sink together with the channel name and the
//! subscriber label.
//!
//! Both helpers (`as_label`, `as_message`) mirror each other so sinks can
//! pick a short stable key or a human-readable description.

use thiserror::Error;

/// Boxed error returned by fallible callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type of one callback invocation.
pub type HandlerResult = Result<(), BoxError>;

/// # Subscriber faults.
///
/// Raised inside a single callback during `invoke`, recovered locally,
/// reported, and dispatch continues with the next subscriber.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The callback panicked.
    #[error("subscriber panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text (or `"unknown panic"`).
        info: String,
    },

    /// The callback returned an error.
    #[error("subscriber failed: {error}")]
    Failed {
        /// The error returned by the callback.
        #[source]
        error: BoxError,
    },
}

impl DispatchError {
    /// Builds a [`DispatchError::Panicked`] from a `catch_unwind` payload.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let info = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        DispatchError::Panicked { info }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use ordcast::DispatchError;
    ///
    /// let err = DispatchError::Panicked { info: "boom".into() };
    /// assert_eq!(err.as_label(), "subscriber_panicked");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::Panicked { .. } => "subscriber_panicked",
            DispatchError::Failed { .. } => "subscriber_failed",
        }
    }

    /// Returns a human-readable message with details about the fault.
    pub fn as_message(&self) -> String {
        match self {
            DispatchError::Panicked { info } => format!("panic: {info}"),
            DispatchError::Failed { error } => format!("error: {error}"),
        }
    }

    /// True if the callback panicked rather than returning an error.
    pub fn is_panic(&self) -> bool {
        matches!(self, DispatchError::Panicked { .. })
    }
}
