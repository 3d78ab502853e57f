//! Conversions between wrappers and to and from boxed closures.
//!
//! Calling modes weaken along the ladder `Fn` to `FnMut` to `FnOnce`, and
//! clonable wrappers weaken to move-only ones; each weakening moves the
//! bound callable unchanged, since every admission table already carries
//! the weaker entries. Boxed closures are the general-purpose external
//! form: they have no empty state, so those conversions go through
//! `Option`.

use crate::{
    signature::{Signature, for_each_arity},
    small_fn::SmallFn,
    unique_fn::UniqueFn,
};

impl<Q, Sp> From<SmallFn<Q, Sp>> for UniqueFn<Q, Sp>
where
    Q: ?Sized + Signature,
{
    /// Forgets clonability; the held callable and its placement are
    /// untouched.
    fn from(f: SmallFn<Q, Sp>) -> Self {
        UniqueFn { inner: f.inner }
    }
}

macro_rules! impl_interop {
    ($($ty:ident),*) => {
        impl<Sp, R, $($ty),*> From<SmallFn<dyn Fn($($ty),*) -> R, Sp>>
            for SmallFn<dyn FnMut($($ty),*) -> R, Sp>
        where
            R: 'static,
            $($ty: 'static,)*
        {
            /// Weakens the calling mode; the held callable is untouched.
            fn from(f: SmallFn<dyn Fn($($ty),*) -> R, Sp>) -> Self {
                SmallFn { inner: f.inner }
            }
        }

        impl<Sp, R, $($ty),*> From<SmallFn<dyn FnMut($($ty),*) -> R, Sp>>
            for SmallFn<dyn FnOnce($($ty),*) -> R, Sp>
        where
            R: 'static,
            $($ty: 'static,)*
        {
            /// Weakens the calling mode; the held callable is untouched.
            fn from(f: SmallFn<dyn FnMut($($ty),*) -> R, Sp>) -> Self {
                SmallFn { inner: f.inner }
            }
        }

        impl<Sp, R, $($ty),*> From<SmallFn<dyn Fn($($ty),*) -> R, Sp>>
            for SmallFn<dyn FnOnce($($ty),*) -> R, Sp>
        where
            R: 'static,
            $($ty: 'static,)*
        {
            /// Weakens the calling mode; the held callable is untouched.
            fn from(f: SmallFn<dyn Fn($($ty),*) -> R, Sp>) -> Self {
                SmallFn { inner: f.inner }
            }
        }

        impl<Sp, R, $($ty),*> From<UniqueFn<dyn Fn($($ty),*) -> R, Sp>>
            for UniqueFn<dyn FnMut($($ty),*) -> R, Sp>
        where
            R: 'static,
            $($ty: 'static,)*
        {
            /// Weakens the calling mode; the held callable is untouched.
            fn from(f: UniqueFn<dyn Fn($($ty),*) -> R, Sp>) -> Self {
                UniqueFn { inner: f.inner }
            }
        }

        impl<Sp, R, $($ty),*> From<UniqueFn<dyn FnMut($($ty),*) -> R, Sp>>
            for UniqueFn<dyn FnOnce($($ty),*) -> R, Sp>
        where
            R: 'static,
            $($ty: 'static,)*
        {
            /// Weakens the calling mode; the held callable is untouched.
            fn from(f: UniqueFn<dyn FnMut($($ty),*) -> R, Sp>) -> Self {
                UniqueFn { inner: f.inner }
            }
        }

        impl<Sp, R, $($ty),*> From<UniqueFn<dyn Fn($($ty),*) -> R, Sp>>
            for UniqueFn<dyn FnOnce($($ty),*) -> R, Sp>
        where
            R: 'static,
            $($ty: 'static,)*
        {
            /// Weakens the calling mode; the held callable is untouched.
            fn from(f: UniqueFn<dyn Fn($($ty),*) -> R, Sp>) -> Self {
                UniqueFn { inner: f.inner }
            }
        }

        impl<Sp, R, $($ty),*> SmallFn<dyn Fn($($ty),*) -> R, Sp>
        where
            Sp: 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            /// Repackages the wrapper as a boxed closure, or `None` when
            /// empty.
            #[allow(non_snake_case)]
            pub fn into_boxed(self) -> Option<Box<dyn Fn($($ty),*) -> R>> {
                if self.is_empty() {
                    return None;
                }
                Some(Box::new(move |$($ty),*| self.call(($($ty,)*))))
            }
        }

        impl<Sp, R, $($ty),*> SmallFn<dyn FnMut($($ty),*) -> R, Sp>
        where
            Sp: 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            /// Repackages the wrapper as a boxed closure, or `None` when
            /// empty.
            #[allow(non_snake_case)]
            pub fn into_boxed(mut self) -> Option<Box<dyn FnMut($($ty),*) -> R>> {
                if self.is_empty() {
                    return None;
                }
                Some(Box::new(move |$($ty),*| self.call_mut(($($ty,)*))))
            }
        }

        impl<Sp, R, $($ty),*> SmallFn<dyn FnOnce($($ty),*) -> R, Sp>
        where
            Sp: 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            /// Repackages the wrapper as a boxed closure, or `None` when
            /// empty.
            #[allow(non_snake_case)]
            pub fn into_boxed(self) -> Option<Box<dyn FnOnce($($ty),*) -> R>> {
                if self.is_empty() {
                    return None;
                }
                Some(Box::new(move |$($ty),*| self.call_once(($($ty,)*))))
            }
        }

        impl<Sp, R, $($ty),*> UniqueFn<dyn Fn($($ty),*) -> R, Sp>
        where
            Sp: 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            /// Repackages the wrapper as a boxed closure, or `None` when
            /// empty.
            #[allow(non_snake_case)]
            pub fn into_boxed(self) -> Option<Box<dyn Fn($($ty),*) -> R>> {
                if self.is_empty() {
                    return None;
                }
                Some(Box::new(move |$($ty),*| self.call(($($ty,)*))))
            }

            /// Wraps an optional boxed closure, mapping `None` to the empty
            /// wrapper.
            pub fn from_boxed(boxed: Option<Box<dyn Fn($($ty),*) -> R>>) -> Self {
                match boxed {
                    Some(f) => Self::new(f),
                    None => Self::empty(),
                }
            }
        }

        impl<Sp, R, $($ty),*> UniqueFn<dyn FnMut($($ty),*) -> R, Sp>
        where
            Sp: 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            /// Repackages the wrapper as a boxed closure, or `None` when
            /// empty.
            #[allow(non_snake_case)]
            pub fn into_boxed(mut self) -> Option<Box<dyn FnMut($($ty),*) -> R>> {
                if self.is_empty() {
                    return None;
                }
                Some(Box::new(move |$($ty),*| self.call_mut(($($ty,)*))))
            }

            /// Wraps an optional boxed closure, mapping `None` to the empty
            /// wrapper.
            pub fn from_boxed(boxed: Option<Box<dyn FnMut($($ty),*) -> R>>) -> Self {
                match boxed {
                    Some(f) => Self::new(f),
                    None => Self::empty(),
                }
            }
        }

        impl<Sp, R, $($ty),*> UniqueFn<dyn FnOnce($($ty),*) -> R, Sp>
        where
            Sp: 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            /// Repackages the wrapper as a boxed closure, or `None` when
            /// empty.
            #[allow(non_snake_case)]
            pub fn into_boxed(self) -> Option<Box<dyn FnOnce($($ty),*) -> R>> {
                if self.is_empty() {
                    return None;
                }
                Some(Box::new(move |$($ty),*| self.call_once(($($ty,)*))))
            }

            /// Wraps an optional boxed closure, mapping `None` to the empty
            /// wrapper.
            pub fn from_boxed(boxed: Option<Box<dyn FnOnce($($ty),*) -> R>>) -> Self {
                match boxed {
                    Some(f) => Self::new(f),
                    None => Self::empty(),
                }
            }
        }
    };
}

for_each_arity!(impl_interop);
