//! # Callback shapes.
//!
//! A [`Shape`] describes how a channel's callbacks are declared and how one
//! dispatch hands its arguments to each of them. Every channel is generic
//! over exactly one shape; the ordering engine, the lock discipline and the
//! fault isolation are shared and never depend on it.
//!
//! ## Built-in shapes
//! ```text
//!  Values<(A, .., F)>   Fn(A, .., F)          0-6 params, each handler gets a clone
//!  Refs<(T, .., V)>     Fn(&mut T, .., &mut V) 1-3 params, threaded through the chain
//!  Transforms<(A..), (T..)> Fn(A, .., &mut T, ..) 1-3 values + 1-2 chained references
//!  Transform<A, T>      Fn(A, &mut T)          single value + single reference
//!  Slices<(A, .., C)>   Fn(&[A], .., &[C])     1-3 call-scoped buffers
//!  BufferMut<T>         Fn(&mut [T])           one call-scoped writable buffer
//!  Fallible<T>          Fn(T) -> Result<..>    value callback that may fail
//! ```
//!
//! ## Rules
//! - `Shape::dispatch` runs once per subscriber with the **same** `&mut Args`,
//!   so by-reference shapes observe the previous handler's writes.
//! - Buffer shapes are declared with higher-ranked lifetimes; a handler cannot
//!   keep the slice past its own call.
//! - Closures are wrapped through [`IntoCallback`]; annotate the closure's
//!   parameter types (`|v: &mut i32| ..`) so the compiler can pick the shape.

mod fallible;
mod refs;
mod slices;
mod values;

use std::sync::Arc;

use crate::error::HandlerResult;

pub use fallible::Fallible;
pub use refs::{Ref, Refs, Transform, Transforms};
pub use slices::{Buffer, BufferMut, Slices};
pub use values::{Signal, Values};

/// Declared callback shape of a channel.
///
/// Implementations are zero-sized markers; the channel never stores a value
/// of the shape itself.
pub trait Shape: 'static {
    /// Unsized callable stored behind an `Arc` (usually a `dyn Fn(..)`).
    type Callback: ?Sized + Send + Sync + 'static;

    /// Arguments supplied to one `invoke`.
    type Args<'a>;

    /// Calls `callback` once with `args`.
    ///
    /// Panics are caught by the caller; an `Err` is reported as a subscriber
    /// failure.
    fn dispatch(callback: &Self::Callback, args: &mut Self::Args<'_>) -> HandlerResult;
}

/// Conversion of a closure into a shape's callback.
pub trait IntoCallback<S: Shape> {
    /// Wraps `self` into the shared callback representation.
    fn into_callback(self) -> Arc<S::Callback>;
}
