//! Call-scoped buffer shapes.
//!
//! The caller keeps ownership of the buffers; handlers get non-owning slices
//! that are valid for the duration of their own call only. The callback types
//! are higher-ranked over the slice lifetime, so retaining a slice does not
//! compile.

use std::marker::PhantomData;
use std::sync::Arc;

use super::{IntoCallback, Shape};
use crate::error::HandlerResult;

/// Callbacks taking each element type of `T` as a read-only slice.
pub struct Slices<T>(PhantomData<fn() -> T>);

/// Single read-only buffer.
pub type Buffer<T> = Slices<(T,)>;

macro_rules! slices_shape {
    ($($T:ident $v:ident),+) => {
        impl<$($T: 'static),+> Shape for Slices<($($T,)+)> {
            type Callback = dyn Fn($(&[$T]),+) + Send + Sync;
            type Args<'a> = ($(&'a [$T],)+);

            fn dispatch(callback: &Self::Callback, args: &mut Self::Args<'_>) -> HandlerResult {
                let ($($v,)+) = args;
                callback($(*$v),+);
                Ok(())
            }
        }

        impl<F, $($T: 'static),+> IntoCallback<Slices<($($T,)+)>> for F
        where
            F: Fn($(&[$T]),+) + Send + Sync + 'static,
        {
            fn into_callback(self) -> Arc<dyn Fn($(&[$T]),+) + Send + Sync> {
                Arc::new(self)
            }
        }
    };
}

slices_shape!(A a);
slices_shape!(A a, B b);
slices_shape!(A a, B b, C c);

/// Callbacks taking one writable buffer, e.g. to fill a caller-owned scratch area.
pub struct BufferMut<T>(PhantomData<fn() -> T>);

impl<T: 'static> Shape for BufferMut<T> {
    type Callback = dyn Fn(&mut [T]) + Send + Sync;
    type Args<'a> = &'a mut [T];

    fn dispatch(callback: &Self::Callback, args: &mut Self::Args<'_>) -> HandlerResult {
        callback(&mut **args);
        Ok(())
    }
}

impl<F, T: 'static> IntoCallback<BufferMut<T>> for F
where
    F: Fn(&mut [T]) + Send + Sync + 'static,
{
    fn into_callback(self) -> Arc<dyn Fn(&mut [T]) + Send + Sync> {
        Arc::new(self)
    }
}
