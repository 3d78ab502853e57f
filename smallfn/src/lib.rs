//! Small-buffer-optimized polymorphic callable wrappers.
//!
//! [`SmallFn`] (clonable) and [`UniqueFn`] (move-only) hold anything
//! callable with a given signature behind one fixed interface, keeping
//! small callables in an inline buffer instead of boxing them. The
//! signature is written as a `dyn Fn…` type whose trait picks the calling
//! mode, and compatibility, calling mode, and clonability are all settled
//! at compile time.
//!
//! ```
//! use smallfn::{SmallFn, Storage};
//!
//! let base = 100;
//! let add: SmallFn<dyn Fn(i32) -> i32> = SmallFn::new(move |x: i32| base + x);
//!
//! assert_eq!(add.call((7,)), 107);
//! assert_eq!(add.storage(), Storage::Inline);
//! ```

mod bound;
mod convert;
mod error;
mod signature;
mod slot;
mod small_fn;
mod space;
mod table;
mod unique_fn;

pub use error::{EmptyCallError, SpillError};
pub use signature::{
    Compatible, CompatibleClone, Invoke, InvokeMut, InvokeOnce, Signature, SignatureMut,
    SignatureRef,
};
pub use slot::Storage;
pub use small_fn::SmallFn;
pub use space::{DefaultSpace, S0, S1, S2, S4, S8, S16, S32};
pub use table::CallTable;
pub use unique_fn::UniqueFn;
