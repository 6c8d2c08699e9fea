//! # Process-wide active sink.
//!
//! A single swappable reference, set at startup with [`install`] and cleared
//! at shutdown with [`uninstall`]. Every report loads the sink that is active
//! at that moment, so replacing it at runtime takes effect for the next fault
//! on every channel.
//!
//! ## Rules
//! - No sink installed → faults are dropped silently.
//! - Swaps and loads are single atomic operations ([`arc_swap`]); reporting
//!   never takes a lock.
//! - A sink replaced while a report is in flight finishes that report.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use super::sink::{Failure, FailureSink};

struct Installed {
    sink: Arc<dyn FailureSink>,
}

static ACTIVE: ArcSwapOption<Installed> = ArcSwapOption::const_empty();

/// Installs `sink` as the active sink and returns the one it replaced.
pub fn install<K: FailureSink>(sink: K) -> Option<Arc<dyn FailureSink>> {
    install_arc(Arc::new(sink))
}

/// Installs an already shared sink and returns the one it replaced.
pub fn install_arc(sink: Arc<dyn FailureSink>) -> Option<Arc<dyn FailureSink>> {
    log::debug!("failure sink installed: {}", sink.name());
    ACTIVE
        .swap(Some(Arc::new(Installed { sink })))
        .map(|prev| Arc::clone(&prev.sink))
}

/// Clears the active sink, disabling reporting; returns the removed sink.
pub fn uninstall() -> Option<Arc<dyn FailureSink>> {
    let prev = ACTIVE.swap(None).map(|prev| Arc::clone(&prev.sink));
    if let Some(sink) = &prev {
        log::debug!("failure sink uninstalled: {}", sink.name());
    }
    prev
}

/// Returns the currently active sink.
pub fn active() -> Option<Arc<dyn FailureSink>> {
    let current = ACTIVE.load();
    (*current)
        .as_ref()
        .map(|installed| Arc::clone(&installed.sink))
}

/// True if a sink is installed.
pub fn is_installed() -> bool {
    ACTIVE.load().is_some()
}

/// Installs `sink` until the returned guard is dropped, then restores the
/// previously active sink (or none).
pub fn scoped<K: FailureSink>(sink: K) -> SinkGuard {
    SinkGuard {
        previous: install(sink),
    }
}

/// Restores the previous sink on drop. See [`scoped`].
#[must_use = "dropping the guard immediately restores the previous sink"]
pub struct SinkGuard {
    previous: Option<Arc<dyn FailureSink>>,
}

impl Drop for SinkGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(prev) => {
                install_arc(prev);
            }
            None => {
                uninstall();
            }
        }
    }
}

/// Forwards `failure` to the active sink, containing any panic it raises.
pub(crate) fn report(failure: &Failure<'_>) {
    let current = ACTIVE.load();
    let Some(installed) = &*current else {
        return;
    };

    let sink = &installed.sink;
    if catch_unwind(AssertUnwindSafe(|| sink.report(failure))).is_err() {
        log::warn!(
            "failure sink '{}' panicked while reporting for channel '{}'",
            sink.name(),
            failure.channel
        );
    }
}
