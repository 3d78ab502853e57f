use std::fmt;

use crate::{
    bound::{Bound, empty_call},
    error::{EmptyCallError, SpillError},
    signature::{CompatibleClone, Signature, SignatureMut, SignatureRef},
    slot::{Slot, Storage},
    space::DefaultSpace,
};

/// A clonable, small-buffer-optimized callable wrapper.
///
/// `SmallFn` owns one callable of any concrete type matching the signature
/// `Q`, written as a `dyn Fn…`, `dyn FnMut…`, or `dyn FnOnce…` type.
/// Callables no larger than the space `Sp` are stored inline; bigger or
/// more aligned ones spill into their own heap block. Arguments are passed
/// as a tuple, mirroring how the signature lists them.
///
/// Admission requires the callable to be [`Clone`], which keeps the whole
/// wrapper clonable; for move-only callables use [`UniqueFn`].
///
/// [`UniqueFn`]: crate::UniqueFn
///
/// # Examples
///
/// ```
/// use smallfn::{SmallFn, Storage};
///
/// let base = 40;
/// let add: SmallFn<dyn Fn(i32) -> i32> = SmallFn::new(move |x: i32| base + x);
///
/// assert_eq!(add.call((2,)), 42);
/// assert_eq!(add.storage(), Storage::Inline);
///
/// let copy = add.clone();
/// assert_eq!(copy.call((2,)), 42);
/// ```
pub struct SmallFn<Q, Sp = DefaultSpace>
where
    Q: ?Sized + Signature,
{
    pub(crate) inner: Option<Bound<Q::Args, Q::Output, Sp>>,
}

impl<Q, Sp> SmallFn<Q, Sp>
where
    Q: ?Sized + Signature,
{
    /// Creates a wrapper holding no callable.
    ///
    /// Calling it panics; [`try_call`](Self::try_call) and friends report
    /// [`EmptyCallError`] instead.
    #[must_use]
    pub const fn empty() -> Self {
        SmallFn { inner: None }
    }

    /// Wraps `f`, storing it inline when it fits the space `Sp`.
    ///
    /// Compatibility is settled at compile time: the callable must match
    /// the signature's argument and return types, support its calling mode,
    /// and be [`Clone`]. A callable that only implements `FnMut` is
    /// rejected for a shared-call signature:
    ///
    /// ```compile_fail
    /// use smallfn::SmallFn;
    ///
    /// let mut hits = 0;
    /// let _f: SmallFn<dyn Fn()> = SmallFn::new(move || hits += 1);
    /// ```
    ///
    /// So is a callable that cannot be cloned, like a boxed closure or a
    /// closure capturing one; move-only callables belong in
    /// [`UniqueFn`](crate::UniqueFn):
    ///
    /// ```compile_fail
    /// use smallfn::SmallFn;
    ///
    /// let boxed: Box<dyn Fn() -> i32> = Box::new(|| 41);
    /// let _f: SmallFn<dyn Fn() -> i32> = SmallFn::new(boxed);
    /// ```
    #[must_use]
    pub fn new<F>(f: F) -> Self
    where
        Q: CompatibleClone<F>,
    {
        SmallFn {
            inner: Some(Bound::new(Q::CLONE_TABLE, Slot::place(f))),
        }
    }

    /// Fallible [`new`](Self::new): reports heap-allocation failure for a
    /// callable that does not fit inline, instead of diverting through the
    /// global allocation handler.
    pub fn try_new<F>(f: F) -> Result<Self, SpillError>
    where
        Q: CompatibleClone<F>,
    {
        Ok(SmallFn {
            inner: Some(Bound::new(Q::CLONE_TABLE, Slot::try_place(f)?)),
        })
    }

    /// Whether the wrapper holds no callable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Where the callable currently lives.
    #[must_use]
    pub fn storage(&self) -> Storage {
        match &self.inner {
            None => Storage::Empty,
            Some(bound) => bound.storage(),
        }
    }

    /// Drops the held callable, leaving the wrapper empty.
    pub fn clear(&mut self) {
        self.inner = None;
    }

    /// Moves the callable into a wrapper with inline capacity `Sp2`.
    ///
    /// A spilled callable keeps its existing allocation; an inline one is
    /// copied into the new space, spilling if it no longer fits.
    ///
    /// ```
    /// use smallfn::{S0, SmallFn, Storage};
    ///
    /// let x = 7u64;
    /// let f: SmallFn<dyn Fn() -> u64> = SmallFn::new(move || x);
    /// assert_eq!(f.storage(), Storage::Inline);
    ///
    /// let f: SmallFn<dyn Fn() -> u64, S0> = f.resize();
    /// assert_eq!(f.storage(), Storage::Spilled);
    /// assert_eq!(f.call(()), 7);
    /// ```
    #[must_use]
    pub fn resize<Sp2>(self) -> SmallFn<Q, Sp2> {
        SmallFn {
            inner: self.inner.map(Bound::transfer),
        }
    }

    /// Invokes by consuming the wrapper.
    ///
    /// Every calling mode supports this; the callable is moved out of its
    /// cell before the call, so storage is released even if it panics.
    ///
    /// # Panics
    ///
    /// Panics if the wrapper is empty.
    pub fn call_once(mut self, args: Q::Args) -> Q::Output {
        match self.inner.take() {
            Some(bound) => bound.consume(args),
            None => empty_call(),
        }
    }

    /// Invokes by consuming the wrapper, reporting emptiness instead of
    /// panicking.
    pub fn try_call_once(mut self, args: Q::Args) -> Result<Q::Output, EmptyCallError> {
        match self.inner.take() {
            Some(bound) => Ok(bound.consume(args)),
            None => Err(EmptyCallError),
        }
    }
}

impl<Q, Sp> SmallFn<Q, Sp>
where
    Q: ?Sized + SignatureRef,
{
    /// Invokes through a shared reference.
    ///
    /// Only `dyn Fn…` signatures expose this; requesting it on a weaker
    /// mode is a compile-time error.
    ///
    /// # Panics
    ///
    /// Panics if the wrapper is empty.
    pub fn call(&self, args: Q::Args) -> Q::Output {
        match &self.inner {
            Some(bound) => bound.call(args),
            None => empty_call(),
        }
    }

    /// Invokes through a shared reference, reporting emptiness instead of
    /// panicking.
    pub fn try_call(&self, args: Q::Args) -> Result<Q::Output, EmptyCallError> {
        match &self.inner {
            Some(bound) => Ok(bound.call(args)),
            None => Err(EmptyCallError),
        }
    }
}

impl<Q, Sp> SmallFn<Q, Sp>
where
    Q: ?Sized + SignatureMut,
{
    /// Invokes through a unique reference.
    ///
    /// Available for `dyn Fn…` and `dyn FnMut…` signatures.
    ///
    /// # Panics
    ///
    /// Panics if the wrapper is empty.
    pub fn call_mut(&mut self, args: Q::Args) -> Q::Output {
        match &mut self.inner {
            Some(bound) => bound.call_mut(args),
            None => empty_call(),
        }
    }

    /// Invokes through a unique reference, reporting emptiness instead of
    /// panicking.
    pub fn try_call_mut(&mut self, args: Q::Args) -> Result<Q::Output, EmptyCallError> {
        match &mut self.inner {
            Some(bound) => Ok(bound.call_mut(args)),
            None => Err(EmptyCallError),
        }
    }
}

impl<Q, Sp> Clone for SmallFn<Q, Sp>
where
    Q: ?Sized + Signature,
{
    /// Clones the held callable into its own storage.
    ///
    /// Value captures diverge from this point on; shared handles such as
    /// [`Rc`](std::rc::Rc) captures keep pointing at the same state.
    fn clone(&self) -> Self {
        SmallFn {
            inner: self.inner.as_ref().map(Bound::duplicate),
        }
    }
}

impl<Q, Sp> Default for SmallFn<Q, Sp>
where
    Q: ?Sized + Signature,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<Q, Sp> fmt::Debug for SmallFn<Q, Sp>
where
    Q: ?Sized + Signature,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmallFn")
            .field("storage", &self.storage())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_reports_storage_state() {
        let bound: SmallFn<dyn Fn() -> i32> = SmallFn::new(|| 1);
        assert_eq!(format!("{bound:?}"), "SmallFn { storage: Inline }");

        let empty = SmallFn::<dyn Fn() -> i32>::empty();
        assert_eq!(format!("{empty:?}"), "SmallFn { storage: Empty }");
    }
}
