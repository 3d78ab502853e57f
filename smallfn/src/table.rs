use std::{alloc::Layout, ptr};

use crate::signature::{Invoke, InvokeMut, InvokeOnce};

/// Erased operations for one concrete callable type under one calling mode.
///
/// Tables are built as promoted constants by the admission traits, one per
/// callable-and-mode pair, and shared by `'static` reference; there is no
/// runtime table construction to guard. Entries a mode does not support are
/// `None` and stay unreachable through the typed wrapper surface.
///
/// The table carries the callable's [`Layout`] instead of a relocation
/// entry: values move bitwise, so owners relocate state by moving the slot
/// or copying `layout.size()` bytes.
pub struct CallTable<A, R> {
    /// Invoke through a shared reference; present for shared-call modes.
    pub(crate) call: Option<unsafe fn(*const u8, A) -> R>,
    /// Invoke through a unique reference; present for mutable-call modes.
    pub(crate) call_mut: Option<unsafe fn(*mut u8, A) -> R>,
    /// Invoke by consuming the value; always present. Reads the callable
    /// out of its cell before calling, so the cell is vacated even if the
    /// call panics.
    pub(crate) call_once: unsafe fn(*mut u8, A) -> R,
    /// Placement-clone into a prepared destination; `None` for move-only
    /// admissions.
    pub(crate) clone: Option<unsafe fn(*const u8, *mut u8)>,
    /// In-place destructor. Freeing a spilled block stays the cell's job.
    pub(crate) drop_in_place: unsafe fn(*mut u8),
    /// Layout of the concrete callable behind the erased pointers.
    pub(crate) layout: Layout,
}

/// # Safety
///
/// `data` must point to a live, properly aligned `F`.
pub(crate) unsafe fn call_thunk<F, A>(data: *const u8, args: A) -> F::Output
where
    F: Invoke<A>,
{
    unsafe { (*data.cast::<F>()).invoke(args) }
}

/// # Safety
///
/// `data` must point to a live, properly aligned `F` with unique access.
pub(crate) unsafe fn call_mut_thunk<F, A>(data: *mut u8, args: A) -> F::Output
where
    F: InvokeMut<A>,
{
    unsafe { (*data.cast::<F>()).invoke_mut(args) }
}

/// # Safety
///
/// `data` must point to a live, properly aligned `F` with unique access.
/// The value is moved out; the caller must treat the cell as vacated even
/// when the call unwinds.
pub(crate) unsafe fn call_once_thunk<F, A>(data: *mut u8, args: A) -> F::Output
where
    F: InvokeOnce<A>,
{
    let callable = unsafe { data.cast::<F>().read() };
    callable.invoke_once(args)
}

/// # Safety
///
/// `src` must point to a live `F`; `dst` must be valid, properly aligned
/// storage for an `F`. On unwind nothing has been written to `dst`.
pub(crate) unsafe fn clone_thunk<F: Clone>(src: *const u8, dst: *mut u8) {
    let copy = unsafe { &*src.cast::<F>() }.clone();
    unsafe { dst.cast::<F>().write(copy) };
}

/// # Safety
///
/// `data` must point to a live, properly aligned `F` with unique access.
pub(crate) unsafe fn drop_thunk<F>(data: *mut u8) {
    unsafe { ptr::drop_in_place(data.cast::<F>()) };
}
