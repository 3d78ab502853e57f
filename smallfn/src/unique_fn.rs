use std::fmt;

use crate::{
    bound::{Bound, empty_call},
    error::{EmptyCallError, SpillError},
    signature::{Compatible, Signature, SignatureMut, SignatureRef},
    slot::{Slot, Storage},
    space::DefaultSpace,
};

/// A move-only, small-buffer-optimized callable wrapper.
///
/// The move-only counterpart of [`SmallFn`](crate::SmallFn): admission
/// drops the [`Clone`] requirement, so callables owning unclonable state
/// qualify. Every [`SmallFn`](crate::SmallFn) converts into a `UniqueFn`
/// of the same signature; the reverse conversion does not exist.
///
/// # Examples
///
/// ```
/// use smallfn::UniqueFn;
///
/// let payload = Box::new(String::from("deferred"));
/// let take: UniqueFn<dyn FnOnce() -> String> = UniqueFn::new(move || *payload);
///
/// assert_eq!(take.call_once(()), "deferred");
/// ```
pub struct UniqueFn<Q, Sp = DefaultSpace>
where
    Q: ?Sized + Signature,
{
    pub(crate) inner: Option<Bound<Q::Args, Q::Output, Sp>>,
}

impl<Q, Sp> UniqueFn<Q, Sp>
where
    Q: ?Sized + Signature,
{
    /// Creates a wrapper holding no callable.
    #[must_use]
    pub const fn empty() -> Self {
        UniqueFn { inner: None }
    }

    /// Wraps `f`, storing it inline when it fits the space `Sp`.
    ///
    /// The callable must match the signature's argument and return types
    /// and support its calling mode; both are checked at compile time. A
    /// consuming-mode wrapper never exposes the stronger call surfaces:
    ///
    /// ```compile_fail
    /// use smallfn::UniqueFn;
    ///
    /// let f: UniqueFn<dyn FnOnce() -> i32> = UniqueFn::new(|| 3);
    /// f.call(());
    /// ```
    ///
    /// and a mutable-mode wrapper keeps the shared call off its surface:
    ///
    /// ```compile_fail
    /// use smallfn::UniqueFn;
    ///
    /// let mut tally = 0;
    /// let f: UniqueFn<dyn FnMut(i32)> = UniqueFn::new(move |x: i32| tally += x);
    /// f.call((1,));
    /// ```
    #[must_use]
    pub fn new<F>(f: F) -> Self
    where
        Q: Compatible<F>,
    {
        UniqueFn {
            inner: Some(Bound::new(Q::TABLE, Slot::place(f))),
        }
    }

    /// Fallible [`new`](Self::new): reports heap-allocation failure for a
    /// callable that does not fit inline.
    pub fn try_new<F>(f: F) -> Result<Self, SpillError>
    where
        Q: Compatible<F>,
    {
        Ok(UniqueFn {
            inner: Some(Bound::new(Q::TABLE, Slot::try_place(f)?)),
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

    /// Moves the callable into a wrapper with inline capacity `Sp2`,
    /// keeping a spilled allocation where one already exists.
    #[must_use]
    pub fn resize<Sp2>(self) -> UniqueFn<Q, Sp2> {
        UniqueFn {
            inner: self.inner.map(Bound::transfer),
        }
    }

    /// Invokes by consuming the wrapper.
    ///
    /// The callable is moved out of its cell before the call, so storage is
    /// released even if it panics.
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

impl<Q, Sp> UniqueFn<Q, Sp>
where
    Q: ?Sized + SignatureRef,
{
    /// Invokes through a shared reference; `dyn Fn…` signatures only.
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

impl<Q, Sp> UniqueFn<Q, Sp>
where
    Q: ?Sized + SignatureMut,
{
    /// Invokes through a unique reference; `dyn Fn…` and `dyn FnMut…`
    /// signatures.
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

impl<Q, Sp> Default for UniqueFn<Q, Sp>
where
    Q: ?Sized + Signature,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<Q, Sp> fmt::Debug for UniqueFn<Q, Sp>
where
    Q: ?Sized + Signature,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueFn")
            .field("storage", &self.storage())
            .finish()
    }
}
