//! Value callbacks that report failure by returning `Err`.
//!
//! The error is reported to the failure sink exactly like a panic; it never
//! reaches the `invoke` caller and never stops the remaining subscribers.

use std::marker::PhantomData;
use std::sync::Arc;

use super::{IntoCallback, Shape};
use crate::error::{BoxError, HandlerResult};

/// Callbacks taking `T` by value and returning a `Result`.
pub struct Fallible<T>(PhantomData<fn() -> T>);

impl<T: Clone + 'static> Shape for Fallible<T> {
    type Callback = dyn Fn(T) -> HandlerResult + Send + Sync;
    type Args<'a> = T;

    fn dispatch(callback: &Self::Callback, args: &mut Self::Args<'_>) -> HandlerResult {
        callback(args.clone())
    }
}

impl<F, T, E> IntoCallback<Fallible<T>> for F
where
    F: Fn(T) -> Result<(), E> + Send + Sync + 'static,
    T: Clone + 'static,
    E: Into<BoxError>,
{
    fn into_callback(self) -> Arc<dyn Fn(T) -> HandlerResult + Send + Sync> {
        Arc::new(move |value: T| (self)(value).map_err(Into::into))
    }
}
