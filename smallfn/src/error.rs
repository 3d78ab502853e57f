use thiserror::Error;

/// Error returned when a `try_call` variant finds the wrapper empty.
///
/// The panicking call family reports the same condition by panicking with a
/// fixed message instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invoked an empty smallfn wrapper")]
pub struct EmptyCallError;

/// Error returned when heap storage for a spilled callable cannot be
/// allocated.
///
/// Only fallible constructors surface this; the infallible ones follow the
/// standard collections and divert to [`std::alloc::handle_alloc_error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to allocate {size} bytes for spilled callable state")]
pub struct SpillError {
    /// Size in bytes of the callable that needed out-of-line storage.
    pub size: usize,
}
