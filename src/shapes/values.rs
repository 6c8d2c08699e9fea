//! By-value shapes: `Fn()` up to `Fn(A, B, C, D, E, F)`.

use std::marker::PhantomData;
use std::sync::Arc;

use super::{IntoCallback, Shape};
use crate::error::HandlerResult;

/// Callbacks taking the tuple `T` element-wise by value.
///
/// Every subscriber receives its own clone of each argument.
pub struct Values<T>(PhantomData<fn() -> T>);

/// Parameterless notification.
pub type Signal = Values<()>;

macro_rules! values_shape {
    ($($T:ident $v:ident),*) => {
        impl<$($T: Clone + 'static),*> Shape for Values<($($T,)*)> {
            type Callback = dyn Fn($($T),*) + Send + Sync;
            type Args<'a> = ($($T,)*);

            fn dispatch(callback: &Self::Callback, args: &mut Self::Args<'_>) -> HandlerResult {
                let ($($v,)*) = args;
                callback($($v.clone()),*);
                Ok(())
            }
        }

        impl<F, $($T: Clone + 'static),*> IntoCallback<Values<($($T,)*)>> for F
        where
            F: Fn($($T),*) + Send + Sync + 'static,
        {
            fn into_callback(self) -> Arc<dyn Fn($($T),*) + Send + Sync> {
                Arc::new(self)
            }
        }
    };
}

values_shape!();
values_shape!(A a);
values_shape!(A a, B b);
values_shape!(A a, B b, C c);
values_shape!(A a, B b, C c, D d);
values_shape!(A a, B b, C c, D d, E e);
values_shape!(A a, B b, C c, D d, E e, F6 f);
