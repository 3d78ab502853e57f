use std::alloc::Layout;

use crate::table::{
    CallTable, call_mut_thunk, call_once_thunk, call_thunk, clone_thunk, drop_thunk,
};

mod sealed {
    pub trait Sealed {}

    pub trait Admitted<F> {}
}

/// Type-level description of a call signature.
///
/// Implemented for the `dyn Fn…`, `dyn FnMut…`, and `dyn FnOnce…` types
/// used as wrapper parameters, up to eight arguments. The trait exposes the
/// signature's shape so generic code can name it:
///
/// ```
/// use smallfn::{SignatureRef, SmallFn};
///
/// fn call_twice<Q>(f: &SmallFn<Q>, args: Q::Args) -> (Q::Output, Q::Output)
/// where
///     Q: ?Sized + SignatureRef,
///     Q::Args: Clone,
/// {
///     (f.call(args.clone()), f.call(args))
/// }
///
/// let double: SmallFn<dyn Fn(i32) -> i32> = SmallFn::new(|x: i32| 2 * x);
/// assert_eq!(call_twice(&double, (8,)), (16, 16));
/// ```
pub trait Signature: sealed::Sealed {
    /// Argument types, as a tuple in declaration order (`()` when nullary).
    type Args: 'static;
    /// The type a call produces.
    type Output: 'static;
}

/// Signatures whose wrappers expose the shared-reference call surface.
///
/// Only `dyn Fn…` signatures qualify; their admission tables always carry a
/// shared-call entry.
pub trait SignatureRef: Signature {}

/// Signatures whose wrappers expose the unique-reference call surface.
///
/// `dyn Fn…` and `dyn FnMut…` signatures qualify; their admission tables
/// always carry a mutable-call entry.
pub trait SignatureMut: Signature {}

/// Consuming tuple-call, the erased form of [`FnOnce`].
///
/// Blanket-implemented for every callable of matching arity so the erasure
/// thunks can spread a packed argument tuple back into a plain call.
pub trait InvokeOnce<A> {
    /// The type the call produces.
    type Output;

    /// Calls by value, consuming the callable.
    fn invoke_once(self, args: A) -> Self::Output;
}

/// Mutable tuple-call, the erased form of [`FnMut`].
pub trait InvokeMut<A>: InvokeOnce<A> {
    /// Calls through a unique reference.
    fn invoke_mut(&mut self, args: A) -> Self::Output;
}

/// Shared tuple-call, the erased form of [`Fn`].
pub trait Invoke<A>: InvokeMut<A> {
    /// Calls through a shared reference.
    fn invoke(&self, args: A) -> Self::Output;
}

/// Admission proof that `F` can back a wrapper with this signature.
///
/// An implementation exists exactly when `F` matches the signature's
/// argument and return types and supports its calling mode; anything else
/// is rejected when the wrapper is constructed, not when it is called. The
/// carried table is the complete erased-operation set for the pair, built
/// at compile time.
///
/// ```compile_fail
/// use smallfn::UniqueFn;
///
/// // Two arguments declared, a one-argument closure offered.
/// let _f: UniqueFn<dyn Fn(i32, i32) -> i32> = UniqueFn::new(|x: i32| x);
/// ```
///
/// The proof cannot be forged outside the crate either, not even by
/// borrowing the table of a legitimate admission:
///
/// ```compile_fail
/// use smallfn::{CallTable, Compatible};
///
/// struct NotCallable(u64);
///
/// impl Compatible<NotCallable> for dyn FnOnce() -> u64 {
///     const TABLE: &'static CallTable<(), u64> =
///         <dyn FnOnce() -> u64 as Compatible<fn() -> u64>>::TABLE;
/// }
/// ```
pub trait Compatible<F>: Signature + sealed::Admitted<F> {
    /// Operation table for `F` under this signature, without a clone entry.
    const TABLE: &'static CallTable<Self::Args, Self::Output>;
}

/// Admission proof that additionally requires `F: Clone`, for wrappers that
/// are themselves clonable.
pub trait CompatibleClone<F>: Compatible<F> {
    /// Operation table for `F` under this signature, with a clone entry.
    const CLONE_TABLE: &'static CallTable<Self::Args, Self::Output>;
}

/// Invokes a macro once per supported arity with fresh type idents.
macro_rules! for_each_arity {
    ($mac:ident) => {
        $mac!();
        $mac!(T1);
        $mac!(T1, T2);
        $mac!(T1, T2, T3);
        $mac!(T1, T2, T3, T4);
        $mac!(T1, T2, T3, T4, T5);
        $mac!(T1, T2, T3, T4, T5, T6);
        $mac!(T1, T2, T3, T4, T5, T6, T7);
        $mac!(T1, T2, T3, T4, T5, T6, T7, T8);
    };
}
pub(crate) use for_each_arity;

macro_rules! impl_arity {
    ($($ty:ident),*) => {
        impl<R, $($ty),*> sealed::Sealed for dyn Fn($($ty),*) -> R {}
        impl<R, $($ty),*> Signature for dyn Fn($($ty),*) -> R
        where
            R: 'static,
            $($ty: 'static,)*
        {
            type Args = ($($ty,)*);
            type Output = R;
        }
        impl<R, $($ty),*> SignatureRef for dyn Fn($($ty),*) -> R
        where
            R: 'static,
            $($ty: 'static,)*
        {
        }
        impl<R, $($ty),*> SignatureMut for dyn Fn($($ty),*) -> R
        where
            R: 'static,
            $($ty: 'static,)*
        {
        }

        impl<R, $($ty),*> sealed::Sealed for dyn FnMut($($ty),*) -> R {}
        impl<R, $($ty),*> Signature for dyn FnMut($($ty),*) -> R
        where
            R: 'static,
            $($ty: 'static,)*
        {
            type Args = ($($ty,)*);
            type Output = R;
        }
        impl<R, $($ty),*> SignatureMut for dyn FnMut($($ty),*) -> R
        where
            R: 'static,
            $($ty: 'static,)*
        {
        }

        impl<R, $($ty),*> sealed::Sealed for dyn FnOnce($($ty),*) -> R {}
        impl<R, $($ty),*> Signature for dyn FnOnce($($ty),*) -> R
        where
            R: 'static,
            $($ty: 'static,)*
        {
            type Args = ($($ty,)*);
            type Output = R;
        }

        impl<F, R, $($ty),*> InvokeOnce<($($ty,)*)> for F
        where
            F: FnOnce($($ty),*) -> R,
        {
            type Output = R;

            #[allow(non_snake_case)]
            fn invoke_once(self, ($($ty,)*): ($($ty,)*)) -> R {
                self($($ty),*)
            }
        }

        impl<F, R, $($ty),*> InvokeMut<($($ty,)*)> for F
        where
            F: FnMut($($ty),*) -> R,
        {
            #[allow(non_snake_case)]
            fn invoke_mut(&mut self, ($($ty,)*): ($($ty,)*)) -> R {
                self($($ty),*)
            }
        }

        impl<F, R, $($ty),*> Invoke<($($ty,)*)> for F
        where
            F: Fn($($ty),*) -> R,
        {
            #[allow(non_snake_case)]
            fn invoke(&self, ($($ty,)*): ($($ty,)*)) -> R {
                self($($ty),*)
            }
        }

        impl<F, R, $($ty),*> sealed::Admitted<F> for dyn Fn($($ty),*) -> R
        where
            F: Fn($($ty),*) -> R + 'static,
        {
        }

        impl<F, R, $($ty),*> sealed::Admitted<F> for dyn FnMut($($ty),*) -> R
        where
            F: FnMut($($ty),*) -> R + 'static,
        {
        }

        impl<F, R, $($ty),*> sealed::Admitted<F> for dyn FnOnce($($ty),*) -> R
        where
            F: FnOnce($($ty),*) -> R + 'static,
        {
        }

        impl<F, R, $($ty),*> Compatible<F> for dyn Fn($($ty),*) -> R
        where
            F: Fn($($ty),*) -> R + 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            const TABLE: &'static CallTable<($($ty,)*), R> = &CallTable {
                call: Some(call_thunk::<F, ($($ty,)*)>),
                call_mut: Some(call_mut_thunk::<F, ($($ty,)*)>),
                call_once: call_once_thunk::<F, ($($ty,)*)>,
                clone: None,
                drop_in_place: drop_thunk::<F>,
                layout: Layout::new::<F>(),
            };
        }

        impl<F, R, $($ty),*> CompatibleClone<F> for dyn Fn($($ty),*) -> R
        where
            F: Fn($($ty),*) -> R + Clone + 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            const CLONE_TABLE: &'static CallTable<($($ty,)*), R> = &CallTable {
                call: Some(call_thunk::<F, ($($ty,)*)>),
                call_mut: Some(call_mut_thunk::<F, ($($ty,)*)>),
                call_once: call_once_thunk::<F, ($($ty,)*)>,
                clone: Some(clone_thunk::<F>),
                drop_in_place: drop_thunk::<F>,
                layout: Layout::new::<F>(),
            };
        }

        impl<F, R, $($ty),*> Compatible<F> for dyn FnMut($($ty),*) -> R
        where
            F: FnMut($($ty),*) -> R + 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            const TABLE: &'static CallTable<($($ty,)*), R> = &CallTable {
                call: None,
                call_mut: Some(call_mut_thunk::<F, ($($ty,)*)>),
                call_once: call_once_thunk::<F, ($($ty,)*)>,
                clone: None,
                drop_in_place: drop_thunk::<F>,
                layout: Layout::new::<F>(),
            };
        }

        impl<F, R, $($ty),*> CompatibleClone<F> for dyn FnMut($($ty),*) -> R
        where
            F: FnMut($($ty),*) -> R + Clone + 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            const CLONE_TABLE: &'static CallTable<($($ty,)*), R> = &CallTable {
                call: None,
                call_mut: Some(call_mut_thunk::<F, ($($ty,)*)>),
                call_once: call_once_thunk::<F, ($($ty,)*)>,
                clone: Some(clone_thunk::<F>),
                drop_in_place: drop_thunk::<F>,
                layout: Layout::new::<F>(),
            };
        }

        impl<F, R, $($ty),*> Compatible<F> for dyn FnOnce($($ty),*) -> R
        where
            F: FnOnce($($ty),*) -> R + 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            const TABLE: &'static CallTable<($($ty,)*), R> = &CallTable {
                call: None,
                call_mut: None,
                call_once: call_once_thunk::<F, ($($ty,)*)>,
                clone: None,
                drop_in_place: drop_thunk::<F>,
                layout: Layout::new::<F>(),
            };
        }

        impl<F, R, $($ty),*> CompatibleClone<F> for dyn FnOnce($($ty),*) -> R
        where
            F: FnOnce($($ty),*) -> R + Clone + 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            const CLONE_TABLE: &'static CallTable<($($ty,)*), R> = &CallTable {
                call: None,
                call_mut: None,
                call_once: call_once_thunk::<F, ($($ty,)*)>,
                clone: Some(clone_thunk::<F>),
                drop_in_place: drop_thunk::<F>,
                layout: Layout::new::<F>(),
            };
        }
    };
}

for_each_arity!(impl_arity);
