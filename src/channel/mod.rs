//! Ordered multicast channels.
//!
//! This module groups the ordering engine and the channel built on it.
//!
//! ## Contents
//! - [`Channel`] registration, dispatch and lifecycle surface
//! - `entries` priority-sorted entry list; the only place ordering is decided
//! - `scope` per-thread tracking of locked dispatches (reentrancy detection)

#[allow(clippy::module_inception)]
mod channel;
mod entries;
mod scope;

pub use channel::Channel;
