//! # ordcast
//!
//! **ordcast** is a priority-ordered publish/subscribe dispatch primitive.
//!
//! A publisher owns a long-lived [`Channel`]; independent components register
//! callbacks on it with a priority and get called synchronously, in a total
//! and deterministic order, every time the publisher invokes it. Components
//! never need to know about each other.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   Component A        Component B        Component C
//!        │ subscribe(cb, 10) │ subscribe(cb, 0)  │ subscribe(cb, 10)
//!        ▼                   ▼                   ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Channel<S, P>                                                    │
//! │  - EntryList (sorted by priority, registration order in a tie)    │
//! │  - RwLock guard (upgradable for subscribe, shared for invoke)     │
//! │  - Shape S (how arguments reach each callback)                    │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                │ invoke(args)
//!                                ▼
//!               C(10) ──► A(10) ──► B(0)        (priority desc, newest first)
//!                  │
//!                  └─ panic / Err ──► sinks::report ──► active FailureSink
//! ```
//!
//! ### Dispatch
//! ```text
//! invoke(args)
//!   ├─► snapshot (default): read lock, clone entries, unlock, call each
//!   │   locked:             read lock held across every call (recursive if nested)
//!   ├─► for each entry in dispatch order:
//!   │       catch_unwind(shape.dispatch(callback, &mut args))
//!   │         ├─ Ok          ─► next
//!   │         ├─ Err(e)      ─► report Failed, next
//!   │         └─ panic(info) ─► report Panicked, next
//!   └─► return (): no error, no unwinding
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / functions                        |
//! |-------------------|-----------------------------------------------------------------|----------------------------------------------|
//! | **Channels**      | Subscribe / unsubscribe / invoke / close with priorities.       | [`Channel`], [`Subscriber`]                  |
//! | **Shapes**        | Value, mutable-reference chain and buffer callback signatures. | [`Values`], [`Refs`], [`Transforms`], [`Slices`], [`BufferMut`], [`Fallible`] |
//! | **Failures**      | Per-subscriber fault isolation and reporting.                   | [`FailureSink`], [`sinks::install`], [`DispatchError`] |
//! | **Configuration** | Dispatch lock discipline and preallocation.                     | [`ChannelConfig`], [`DispatchMode`]          |
//!
//! ## Optional features
//! - `logging`: exports [`sinks::LogSink`], a failure sink writing to the `log` facade.
//!
//! ## Example
//! ```rust
//! use ordcast::sinks::{self, CollectingSink};
//! use ordcast::{Channel, Ref, Signal};
//!
//! // Startup: choose where subscriber faults go.
//! let faults = CollectingSink::new();
//! sinks::install(faults.clone());
//!
//! // Plain notification.
//! let saved: Channel<Signal> = Channel::new("saved");
//! let toast = saved.subscribe_fn(|| println!("saved!"), 0);
//! saved.subscribe_fn(|| panic!("broken plugin"), 5);
//! saved.invoke(());
//! assert_eq!(faults.len(), 1);
//!
//! // Transform chain: every handler sees the previous handler's result.
//! let volume: Channel<Ref<f32>> = Channel::new("volume");
//! volume.subscribe_fn(|v: &mut f32| *v *= 0.5, 10);
//! volume.subscribe_fn(|v: &mut f32| *v = v.min(0.4), 0);
//! let mut level = 1.0;
//! volume.invoke((&mut level,));
//! assert_eq!(level, 0.4);
//!
//! saved.unsubscribe(&toast);
//! saved.close();
//!
//! // Shutdown.
//! sinks::uninstall();
//! ```

mod channel;
mod config;
mod error;
mod shapes;
mod subscriber;

pub mod sinks;

// ---- Public re-exports ----

pub use channel::Channel;
pub use config::{ChannelConfig, DispatchMode};
pub use error::{BoxError, DispatchError, HandlerResult};
pub use shapes::{
    Buffer, BufferMut, Fallible, IntoCallback, Ref, Refs, Shape, Signal, Slices, Transform, Transforms, Values,
};
pub use sinks::{Failure, FailureSink};
pub use subscriber::Subscriber;
