//! # Channel configuration.
//!
//! [`ChannelConfig`] defines how a channel dispatches and how much room its
//! entry list reserves up front.
//!
//! ## Sentinel values
//! - `capacity = 0` → no preallocation (the list grows on demand)
//!
//! # Example
//! ```
//! use ordcast::{Channel, ChannelConfig, DispatchMode, Signal};
//!
//! let mut cfg = ChannelConfig::default();
//! cfg.dispatch = DispatchMode::Locked;
//! cfg.capacity = 16;
//!
//! let ch: Channel<Signal> = Channel::with_config("frame-begin", cfg);
//! assert_eq!(ch.config().dispatch, DispatchMode::Locked);
//! ```

/// How `invoke` protects its traversal.
///
/// ## Snapshot
/// ```text
/// invoke ──► read lock ──► clone entries ──► unlock ──► call S1, S2, ..
/// ```
/// Callbacks run with no lock held. Mutations made during a dispatch (from a
/// callback or another thread) are never visible to that dispatch.
///
/// ## Locked
/// ```text
/// invoke ──► read lock ──► call S1, S2, .. ──► unlock ──► flush this thread's deferred
/// ```
/// The read lock spans the whole traversal, so other threads' mutations wait
/// for it. The lock is fair: a waiting writer is served before dispatches
/// that start after it. A callback that subscribes, unsubscribes or closes
/// the channel it is being dispatched from is **deferred** until the
/// outermost dispatch on that thread has released its lock; nested `invoke`
/// re-enters the lock and runs immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchMode {
    /// Copy the entry list, then dispatch lock-free.
    #[default]
    Snapshot,
    /// Hold the read lock for the whole traversal.
    Locked,
}

/// Configuration of one channel.
///
/// ## Field semantics
/// - `dispatch`: lock discipline of `invoke` (see [`DispatchMode`])
/// - `capacity`: initial entry-list capacity (`0` = no preallocation)
#[derive(Clone, Debug, Default)]
pub struct ChannelConfig {
    /// Lock discipline of `invoke`.
    pub dispatch: DispatchMode,

    /// Number of entries to reserve when the channel is created.
    pub capacity: usize,
}

impl ChannelConfig {
    /// Snapshot dispatch with no preallocation.
    #[must_use]
    pub fn snapshot() -> Self {
        Self::default()
    }

    /// Locked dispatch with no preallocation.
    #[must_use]
    pub fn locked() -> Self {
        Self {
            dispatch: DispatchMode::Locked,
            ..Self::default()
        }
    }

    /// Returns a copy with `capacity` entries reserved.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Returns the preallocation as an `Option`.
    ///
    /// - `None` → grow on demand
    /// - `Some(n)` → reserve `n` entries up front
    #[inline]
    pub fn reserved(&self) -> Option<usize> {
        if self.capacity == 0 {
            None
        } else {
            Some(self.capacity)
        }
    }
}
