//! # Priority-ordered multicast channel.
//!
//! [`Channel`] owns one [`EntryList`] and one reader/writer lock, and is
//! generic over the callback [`Shape`]. Every shape shares the same ordering,
//! locking and fault isolation; only the final call differs.
//!
//! ## Architecture
//! ```text
//! subscribe(S, p) ──► upgradable read: plan ──► upgrade: apply ──► EntryList
//! unsubscribe(S)  ──► write: remove ─────────────────────────────► EntryList
//! close()         ──► write: clear + mark closed ────────────────► EntryList
//!
//! invoke(args) ──► read ──► dispatch order (priority desc, newest first in a tie)
//!                              │
//!                              ├──► catch_unwind(S_n(args)) ── Err/panic ──► sinks::report
//!                              ├──► catch_unwind(S_n-1(args))
//!                              └──► ...
//! ```
//!
//! ## Rules
//! - `invoke` attempts every subscriber registered when its traversal starts,
//!   exactly once, and never fails or unwinds into the caller.
//! - Re-subscribing only updates priority/position; unsubscribing an unknown
//!   subscriber is a no-op.
//! - After `close`, every operation is a silent no-op, so teardown order
//!   across interdependent channels does not matter.
//! - Subscribe scans under an upgradable read lock and upgrades it for the
//!   mutation; concurrent subscribes are fully linearized.
//!
//! ## Reentrancy
//! See [`DispatchMode`]. In snapshot mode callbacks run without the lock and
//! may do anything to the channel. In locked mode the outermost dispatch on a
//! thread takes a fair read lock, so a waiting writer is not overtaken by
//! later dispatches; nested `invoke` on the same thread re-enters it
//! recursively. Same-thread mutations are queued per thread and applied in
//! call order once that thread's outermost dispatch returns. A thread never
//! applies another thread's queued mutations.

use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{self, ThreadId};

use parking_lot::{Mutex, RwLock, RwLockUpgradableReadGuard};

use super::entries::EntryList;
use super::scope::{next_channel_id, DispatchScope};
use crate::config::{ChannelConfig, DispatchMode};
use crate::error::DispatchError;
use crate::shapes::{IntoCallback, Shape};
use crate::sinks::{self, Failure};
use crate::subscriber::Subscriber;

struct State<S: Shape, P> {
    entries: EntryList<S, P>,
    closed: bool,
}

/// Mutation requested from inside a locked dispatch of the same channel.
enum Deferred<S: Shape, P> {
    Subscribe(Subscriber<S>, P),
    Unsubscribe(Subscriber<S>),
    Close,
}

/// Ordered multicast dispatcher for callbacks of shape `S`.
///
/// `P` is the priority type; higher priorities are dispatched first.
///
/// # Example
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use ordcast::{Channel, Subscriber, Values};
///
/// let ch: Channel<Values<(u32,)>> = Channel::new("score-changed");
/// let log = Arc::new(Mutex::new(Vec::new()));
///
/// let (l1, l2) = (Arc::clone(&log), Arc::clone(&log));
/// let hud = Subscriber::named("hud", move |s: u32| l1.lock().unwrap().push(("hud", s)));
/// let audio = Subscriber::named("audio", move |s: u32| l2.lock().unwrap().push(("audio", s)));
///
/// ch.subscribe(&hud, 0);
/// ch.subscribe(&audio, 10);
/// ch.invoke((7,));
///
/// assert_eq!(*log.lock().unwrap(), vec![("audio", 7), ("hud", 7)]);
/// ```
pub struct Channel<S: Shape, P = i32> {
    id: u64,
    name: String,
    config: ChannelConfig,
    state: RwLock<State<S, P>>,
    /// Mutations deferred by locked dispatches, keyed by the deferring thread.
    deferred: Mutex<HashMap<ThreadId, Vec<Deferred<S, P>>>>,
}

impl<S: Shape, P: Ord + Clone> Channel<S, P> {
    /// Creates an empty channel with the default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, ChannelConfig::default())
    }

    /// Creates an empty channel with `config`.
    pub fn with_config(name: impl Into<String>, config: ChannelConfig) -> Self {
        let entries = EntryList::with_capacity(config.reserved().unwrap_or(0));
        Self {
            id: next_channel_id(),
            name: name.into(),
            config,
            state: RwLock::new(State {
                entries,
                closed: false,
            }),
            deferred: Mutex::new(HashMap::new()),
        }
    }

    /// Diagnostic name, used in failure reports.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration the channel was created with.
    #[inline]
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Registers `subscriber` at `priority`, or updates its priority if it is
    /// already registered.
    ///
    /// A re-subscription keeps its position when the priority is unchanged or
    /// when its slot among the other entries stays the same; otherwise it is
    /// placed as if it had just been registered at the new priority.
    pub fn subscribe(&self, subscriber: &Subscriber<S>, priority: P) {
        if self.in_locked_dispatch() {
            self.defer(Deferred::Subscribe(subscriber.clone(), priority));
            return;
        }
        self.subscribe_now(subscriber.clone(), priority);
    }

    /// Wraps `f` into a new subscriber, registers it and returns its handle.
    ///
    /// Keep the handle to unsubscribe later.
    pub fn subscribe_fn<F>(&self, f: F, priority: P) -> Subscriber<S>
    where
        F: IntoCallback<S>,
    {
        let subscriber = Subscriber::new(f);
        self.subscribe(&subscriber, priority);
        subscriber
    }

    /// Removes `subscriber`. Unknown subscribers are ignored.
    pub fn unsubscribe(&self, subscriber: &Subscriber<S>) {
        if self.in_locked_dispatch() {
            self.defer(Deferred::Unsubscribe(subscriber.clone()));
            return;
        }
        self.unsubscribe_now(subscriber);
    }

    /// Calls every registered subscriber in dispatch order.
    ///
    /// By-reference shapes thread the same `args` through every call, so the
    /// caller observes the chained result afterwards. Subscriber panics and
    /// errors are reported to the active failure sink and never propagate.
    pub fn invoke(&self, mut args: S::Args<'_>) {
        match self.config.dispatch {
            DispatchMode::Snapshot => self.invoke_snapshot(&mut args),
            DispatchMode::Locked => self.invoke_locked(&mut args),
        }
    }

    /// Clears all subscribers and turns every later operation into a no-op.
    ///
    /// Idempotent. A dispatch already in progress is not disturbed.
    pub fn close(&self) {
        if self.in_locked_dispatch() {
            self.defer(Deferred::Close);
            return;
        }
        self.close_now();
    }

    /// True if at least one subscriber is registered right now.
    ///
    /// Informational only: a later `invoke` may see a different set.
    pub fn has_subscribers(&self) -> bool {
        !self.state.read_recursive().entries.is_empty()
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.state.read_recursive().entries.len()
    }

    /// True if no subscriber is registered.
    pub fn is_empty(&self) -> bool {
        !self.has_subscribers()
    }

    /// True if `subscriber` is registered.
    pub fn contains(&self, subscriber: &Subscriber<S>) -> bool {
        self.state
            .read_recursive()
            .entries
            .position(subscriber)
            .is_some()
    }

    /// Current priority of `subscriber`, if registered.
    pub fn priority_of(&self, subscriber: &Subscriber<S>) -> Option<P> {
        self.state.read_recursive().entries.priority_of(subscriber)
    }

    /// True once [`Self::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.state.read_recursive().closed
    }

    /// Subscriber labels in the order the next `invoke` would call them.
    pub fn dispatch_order(&self) -> Vec<String> {
        self.state
            .read_recursive()
            .entries
            .iter_dispatch()
            .map(|e| e.subscriber.label().to_owned())
            .collect()
    }

    fn subscribe_now(&self, subscriber: Subscriber<S>, priority: P) {
        let state = self.state.upgradable_read();
        if state.closed {
            log::debug!(
                "[{}] subscribe of '{}' ignored: channel closed",
                self.name,
                subscriber.label()
            );
            return;
        }

        let placement = state.entries.plan(&subscriber, &priority);
        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        let outcome = state.entries.apply(placement, subscriber.clone(), priority);
        log::trace!(
            "[{}] subscriber '{}' {}",
            self.name,
            subscriber.label(),
            outcome.as_label()
        );
    }

    fn unsubscribe_now(&self, subscriber: &Subscriber<S>) {
        let mut state = self.state.write();
        if state.closed {
            log::debug!(
                "[{}] unsubscribe of '{}' ignored: channel closed",
                self.name,
                subscriber.label()
            );
            return;
        }
        if state.entries.remove(subscriber) {
            log::trace!("[{}] subscriber '{}' removed", self.name, subscriber.label());
        }
    }

    fn close_now(&self) {
        {
            let mut state = self.state.write();
            if state.closed {
                return;
            }
            state.closed = true;
            state.entries.clear();
        }
        self.deferred.lock().clear();
        log::debug!("[{}] channel closed", self.name);
    }

    fn invoke_snapshot(&self, args: &mut S::Args<'_>) {
        let snapshot = {
            let state = self.state.read();
            if state.closed || state.entries.is_empty() {
                return;
            }
            state.entries.snapshot()
        };

        for entry in &snapshot {
            self.call(&entry.subscriber, args);
        }
    }

    fn invoke_locked(&self, args: &mut S::Args<'_>) {
        {
            let nested = DispatchScope::is_active(self.id);
            let _scope = DispatchScope::enter(self.id);
            // Recursive reads may overtake a queued writer; only re-entry needs them.
            let state = if nested {
                self.state.read_recursive()
            } else {
                self.state.read()
            };
            if !state.closed {
                for entry in state.entries.iter_dispatch() {
                    self.call(&entry.subscriber, args);
                }
            }
        }

        if !DispatchScope::is_active(self.id) {
            self.flush_deferred();
        }
    }

    /// Runs one callback, reporting instead of propagating its failure.
    fn call(&self, subscriber: &Subscriber<S>, args: &mut S::Args<'_>) {
        let result = catch_unwind(AssertUnwindSafe(|| {
            S::dispatch(subscriber.callback(), args)
        }));

        let error = match result {
            Ok(Ok(())) => return,
            Ok(Err(error)) => DispatchError::Failed { error },
            Err(payload) => DispatchError::from_panic(payload),
        };

        sinks::report(&Failure {
            channel: &self.name,
            subscriber: subscriber.label(),
            error: &error,
        });
    }

    fn in_locked_dispatch(&self) -> bool {
        self.config.dispatch == DispatchMode::Locked && DispatchScope::is_active(self.id)
    }

    fn defer(&self, op: Deferred<S, P>) {
        log::debug!("[{}] mutation deferred until dispatch completes", self.name);
        self.deferred
            .lock()
            .entry(thread::current().id())
            .or_default()
            .push(op);
    }

    /// Applies the mutations this thread deferred, in call order.
    fn flush_deferred(&self) {
        let Some(pending) = self.deferred.lock().remove(&thread::current().id()) else {
            return;
        };
        for op in pending {
            match op {
                Deferred::Subscribe(subscriber, priority) => self.subscribe_now(subscriber, priority),
                Deferred::Unsubscribe(subscriber) => self.unsubscribe_now(&subscriber),
                Deferred::Close => self.close_now(),
            }
        }
    }
}

impl<S: Shape, P> fmt::Debug for Channel<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read_recursive();
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("dispatch", &self.config.dispatch)
            .field("subscribers", &state.entries.len())
            .field("closed", &state.closed)
            .finish()
    }
}
