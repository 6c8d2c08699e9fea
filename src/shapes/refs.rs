//! By-reference shapes used for transform and veto chains.
//!
//! One set of mutable references is threaded through every subscriber of a
//! dispatch, so each handler sees what the previous one wrote. The caller
//! reads the final values once `invoke` returns.
//!
//! ## Example
//! ```rust
//! use ordcast::{Channel, Ref};
//!
//! let veto: Channel<Ref<bool>> = Channel::new("close-requested");
//! let _keep_open = veto.subscribe_fn(|allow: &mut bool| *allow = false, 0);
//!
//! let mut allow = true;
//! veto.invoke((&mut allow,));
//! assert!(!allow);
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use super::{IntoCallback, Shape};
use crate::error::HandlerResult;

/// Callbacks taking each element of the tuple `T` as `&mut`.
pub struct Refs<T>(PhantomData<fn() -> T>);

/// Single mutable-reference chain.
pub type Ref<T> = Refs<(T,)>;

macro_rules! refs_shape {
    ($($T:ident $v:ident),+) => {
        impl<$($T: 'static),+> Shape for Refs<($($T,)+)> {
            type Callback = dyn Fn($(&mut $T),+) + Send + Sync;
            type Args<'a> = ($(&'a mut $T,)+);

            fn dispatch(callback: &Self::Callback, args: &mut Self::Args<'_>) -> HandlerResult {
                let ($($v,)+) = args;
                callback($(&mut **$v),+);
                Ok(())
            }
        }

        impl<F, $($T: 'static),+> IntoCallback<Refs<($($T,)+)>> for F
        where
            F: Fn($(&mut $T),+) + Send + Sync + 'static,
        {
            fn into_callback(self) -> Arc<dyn Fn($(&mut $T),+) + Send + Sync> {
                Arc::new(self)
            }
        }
    };
}

refs_shape!(T t);
refs_shape!(T t, U u);
refs_shape!(T t, U u, V v);

/// Callbacks taking the values of tuple `V` followed by chained mutable
/// references to each element of tuple `R`.
///
/// Values are cloned for every subscriber; references are threaded through
/// the whole dispatch. Supported arities: one to three values followed by
/// one or two references.
pub struct Transforms<V, R>(PhantomData<fn() -> (V, R)>);

/// One value followed by one chained mutable reference.
///
/// Typical use: `Transform<Event, Decision>` where every handler inspects
/// the event and may overwrite the decision.
pub type Transform<A, T> = Transforms<(A,), (T,)>;

macro_rules! transforms_shape {
    (($($A:ident $a:ident),+) ($($T:ident $t:ident),+)) => {
        impl<$($A: Clone + 'static,)+ $($T: 'static),+> Shape for Transforms<($($A,)+), ($($T,)+)> {
            type Callback = dyn Fn($($A,)+ $(&mut $T),+) + Send + Sync;
            type Args<'a> = ($($A,)+ $(&'a mut $T,)+);

            fn dispatch(callback: &Self::Callback, args: &mut Self::Args<'_>) -> HandlerResult {
                let ($($a,)+ $($t,)+) = args;
                callback($($a.clone(),)+ $(&mut **$t),+);
                Ok(())
            }
        }

        impl<F, $($A: Clone + 'static,)+ $($T: 'static),+> IntoCallback<Transforms<($($A,)+), ($($T,)+)>> for F
        where
            F: Fn($($A,)+ $(&mut $T),+) + Send + Sync + 'static,
        {
            fn into_callback(self) -> Arc<dyn Fn($($A,)+ $(&mut $T),+) + Send + Sync> {
                Arc::new(self)
            }
        }
    };
}

transforms_shape!((A a) (T t));
transforms_shape!((A a) (T t, U u));
transforms_shape!((A a, B b) (T t));
transforms_shape!((A a, B b) (T t, U u));
transforms_shape!((A a, B b, C c) (T t));
transforms_shape!((A a, B b, C c) (T t, U u));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_chain_sees_previous_write() {
        let double = IntoCallback::<Ref<i32>>::into_callback(|v: &mut i32| *v *= 2);
        let inc = IntoCallback::<Ref<i32>>::into_callback(|v: &mut i32| *v += 1);

        let mut value = 5;
        let mut args = (&mut value,);
        Ref::<i32>::dispatch(&*double, &mut args).unwrap();
        Ref::<i32>::dispatch(&*inc, &mut args).unwrap();
        assert_eq!(value, 11);
    }

    #[test]
    fn test_two_refs() {
        let cb = IntoCallback::<Refs<(u32, String)>>::into_callback(|n: &mut u32, s: &mut String| {
            *n += 1;
            s.push('x');
        });

        let (mut n, mut s) = (0_u32, String::new());
        let mut args = (&mut n, &mut s);
        Refs::<(u32, String)>::dispatch(&*cb, &mut args).unwrap();
        Refs::<(u32, String)>::dispatch(&*cb, &mut args).unwrap();
        assert_eq!(n, 2);
        assert_eq!(s, "xx");
    }

    #[test]
    fn test_transform_value_is_cloned() {
        let cb = IntoCallback::<Transform<String, usize>>::into_callback(
            |word: String, total: &mut usize| *total += word.len(),
        );

        let mut total = 0;
        let mut args = (String::from("abc"), &mut total);
        Transform::<String, usize>::dispatch(&*cb, &mut args).unwrap();
        Transform::<String, usize>::dispatch(&*cb, &mut args).unwrap();
        assert_eq!(args.0, "abc");
        assert_eq!(total, 6);
    }

    #[test]
    fn test_two_values_one_ref() {
        type Damage = Transforms<(u32, &'static str), (i32,)>;
        let cb = IntoCallback::<Damage>::into_callback(|amount: u32, kind: &'static str, hp: &mut i32| {
            if kind != "heal" {
                *hp -= amount as i32;
            }
        });

        let mut hp = 100;
        Damage::dispatch(&*cb, &mut (30, "fire", &mut hp)).unwrap();
        Damage::dispatch(&*cb, &mut (50, "heal", &mut hp)).unwrap();
        assert_eq!(hp, 70);
    }

    #[test]
    fn test_one_value_two_refs() {
        type Route = Transforms<(String,), (bool, Vec<String>)>;
        let cb = IntoCallback::<Route>::into_callback(
            |path: String, handled: &mut bool, trail: &mut Vec<String>| {
                trail.push(path);
                *handled = true;
            },
        );

        let (mut handled, mut trail) = (false, Vec::new());
        let mut args = (String::from("/home"), &mut handled, &mut trail);
        Route::dispatch(&*cb, &mut args).unwrap();
        Route::dispatch(&*cb, &mut args).unwrap();
        assert!(handled);
        assert_eq!(trail, vec!["/home", "/home"]);
    }
}
