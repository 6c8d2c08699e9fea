//! # Subscriber handles.
//!
//! A [`Subscriber`] is the registration key of a channel: a cloneable handle
//! around one shared callback. Two handles are the same subscriber iff they
//! point at the same callback allocation, regardless of label.
//!
//! ## Rules
//! - Cloning a handle keeps its identity; wrapping the same closure twice
//!   creates two distinct subscribers.
//! - The label is only used in failure reports and diagnostics. It defaults
//!   to the closure's type name, which can be verbose; prefer
//!   [`Subscriber::named`] for anything that may fail.

use std::fmt;
use std::sync::Arc;

use crate::shapes::{IntoCallback, Shape};

/// Identity-comparable handle to a registered callback.
pub struct Subscriber<S: Shape> {
    callback: Arc<S::Callback>,
    label: Arc<str>,
}

impl<S: Shape> Subscriber<S> {
    /// Wraps a closure, labelling it with its type name.
    pub fn new<F>(f: F) -> Self
    where
        F: IntoCallback<S>,
    {
        Self {
            callback: f.into_callback(),
            label: Arc::from(std::any::type_name::<F>()),
        }
    }

    /// Wraps a closure under an explicit label.
    ///
    /// The label may be built at runtime, e.g. from a plugin name.
    pub fn named<F>(label: impl Into<Arc<str>>, f: F) -> Self
    where
        F: IntoCallback<S>,
    {
        Self {
            callback: f.into_callback(),
            label: label.into(),
        }
    }

    /// Wraps an already shared callback. Handles built from clones of the
    /// same `Arc` are the same subscriber.
    pub fn from_arc(label: impl Into<Arc<str>>, callback: Arc<S::Callback>) -> Self {
        Self {
            callback,
            label: label.into(),
        }
    }

    /// Returns the diagnostic label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// True if both handles refer to the same callback.
    #[inline]
    pub fn same(&self, other: &Self) -> bool {
        // Compare data pointers only; vtable pointers of the same object may differ.
        std::ptr::eq(
            Arc::as_ptr(&self.callback) as *const (),
            Arc::as_ptr(&other.callback) as *const (),
        )
    }

    pub(crate) fn callback(&self) -> &S::Callback {
        &self.callback
    }
}

impl<S: Shape> Clone for Subscriber<S> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
            label: Arc::clone(&self.label),
        }
    }
}

impl<S: Shape> PartialEq for Subscriber<S> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<S: Shape> Eq for Subscriber<S> {}

impl<S: Shape> fmt::Debug for Subscriber<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("label", &self.label)
            .field("callback", &(Arc::as_ptr(&self.callback) as *const ()))
            .finish()
    }
}
