//! Per-thread record of the channels currently dispatching in locked mode.
//!
//! A locked dispatch holds the channel's read lock while user callbacks run.
//! If one of those callbacks mutates the same channel, taking the write lock
//! on this thread would wait on our own read guard forever; the channel uses
//! [`DispatchScope::is_active`] to detect that case and defer the mutation.

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

thread_local! {
    static ACTIVE: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Allocates a process-unique channel id.
pub(crate) fn next_channel_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Marks `channel` as dispatching on this thread until dropped.
pub(crate) struct DispatchScope {
    channel: u64,
}

impl DispatchScope {
    pub(crate) fn enter(channel: u64) -> Self {
        ACTIVE.with(|active| active.borrow_mut().push(channel));
        Self { channel }
    }

    /// True if this thread is inside a locked dispatch of `channel`.
    pub(crate) fn is_active(channel: u64) -> bool {
        ACTIVE.with(|active| active.borrow().contains(&channel))
    }
}

impl Drop for DispatchScope {
    fn drop(&mut self) {
        ACTIVE.with(|active| {
            let mut active = active.borrow_mut();
            if let Some(pos) = active.iter().rposition(|id| *id == self.channel) {
                active.remove(pos);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_scopes() {
        let id = next_channel_id();
        assert!(!DispatchScope::is_active(id));

        let outer = DispatchScope::enter(id);
        {
            let _inner = DispatchScope::enter(id);
            assert!(DispatchScope::is_active(id));
        }
        assert!(DispatchScope::is_active(id));
        drop(outer);
        assert!(!DispatchScope::is_active(id));
    }

    #[test]
    fn test_scope_is_thread_local() {
        let id = next_channel_id();
        let _scope = DispatchScope::enter(id);
        let seen = std::thread::spawn(move || DispatchScope::is_active(id))
            .join()
            .unwrap();
        assert!(!seen);
    }
}
