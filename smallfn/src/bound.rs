use std::{
    alloc::handle_alloc_error,
    mem::{self, ManuallyDrop, MaybeUninit},
    ptr,
};

use crate::{
    slot::{Slot, Storage, alloc_block},
    table::CallTable,
};

/// Shared failure point for the panicking call family on empty wrappers.
#[cold]
#[inline(never)]
pub(crate) fn empty_call() -> ! {
    panic!("invoked an empty smallfn wrapper")
}

/// An occupied wrapper: a storage slot coupled to the operation table of
/// the concrete callable inside it.
///
/// Emptiness lives one level up as `Option<Bound>`, so a `Bound` always
/// holds a live callable and a matching table. Cleanup order is fixed: run
/// the erased destructor through the table, then release the slot.
pub(crate) struct Bound<A: 'static, R: 'static, S> {
    table: &'static CallTable<A, R>,
    slot: Slot<S>,
}

/// Frees a slot's storage on drop without running the erased destructor.
/// Used where the value has already left the slot or never arrived.
struct ReleaseOnDrop<'a, S>(&'a mut Slot<S>);

impl<S> Drop for ReleaseOnDrop<'_, S> {
    fn drop(&mut self) {
        // SAFETY: callers hand this guard a slot whose value is gone.
        unsafe { self.0.release() };
    }
}

impl<A: 'static, R: 'static, S> Bound<A, R, S> {
    pub(crate) fn new(table: &'static CallTable<A, R>, slot: Slot<S>) -> Self {
        Bound { table, slot }
    }

    pub(crate) fn storage(&self) -> Storage {
        self.slot.storage()
    }

    /// Dispatches the shared-call entry.
    pub(crate) fn call(&self, args: A) -> R {
        let Some(call) = self.table.call else {
            unreachable!("shared call entry missing for a shared-call signature");
        };
        // SAFETY: the slot holds a live value of the table's type.
        unsafe { call(self.slot.data(), args) }
    }

    /// Dispatches the mutable-call entry.
    pub(crate) fn call_mut(&mut self, args: A) -> R {
        let Some(call_mut) = self.table.call_mut else {
            unreachable!("mutable call entry missing for a mutable-call signature");
        };
        // SAFETY: the slot holds a live value of the table's type, and we
        // have it uniquely borrowed.
        unsafe { call_mut(self.slot.data_mut(), args) }
    }

    /// Dispatches the consuming-call entry.
    ///
    /// The thunk reads the callable out of the slot before invoking it, so
    /// after that point, on return or unwind, only storage remains to free.
    pub(crate) fn consume(self, args: A) -> R {
        let mut bound = ManuallyDrop::new(self);
        let call_once = bound.table.call_once;
        let guard = ReleaseOnDrop(&mut bound.slot);
        // SAFETY: the slot holds a live value of the table's type; the
        // guard accounts for the value leaving the slot.
        unsafe { call_once(guard.0.data_mut(), args) }
    }

    /// Clones the erased callable into freshly placed storage.
    ///
    /// Only clonable wrappers reach this, and their admission path always
    /// installs a clone entry.
    pub(crate) fn duplicate(&self) -> Self {
        let Some(clone) = self.table.clone else {
            unreachable!("clone entry missing for a clonable wrapper");
        };
        let mut dst = match Slot::alloc_matching(self.table.layout) {
            Ok(slot) => slot,
            Err(_) => handle_alloc_error(self.table.layout),
        };
        let guard = ReleaseOnDrop(&mut dst);
        // SAFETY: `src` holds a live value of the table's type and `dst`
        // was placed for exactly its layout. If the callable's own clone
        // panics, nothing was written and the guard frees the storage.
        unsafe { clone(self.slot.data(), guard.0.data_mut()) };
        mem::forget(guard);
        Bound {
            table: self.table,
            slot: dst,
        }
    }

    /// Moves the callable into storage with a different inline capacity.
    ///
    /// A spilled block keeps its allocation even when the new space could
    /// hold it; inline state is copied bitwise, spilling if the new space
    /// is too small.
    pub(crate) fn transfer<S2>(self) -> Bound<A, R, S2> {
        let mut bound = ManuallyDrop::new(self);
        let table = bound.table;
        let slot = mem::replace(&mut bound.slot, Slot::Inline(MaybeUninit::uninit()));
        let slot = match slot {
            Slot::Spilled { ptr, layout } => Slot::Spilled { ptr, layout },
            Slot::Inline(buf) => {
                let layout = table.layout;
                let src = buf.as_ptr().cast::<u8>();
                if Slot::<S2>::layout_fits_inline(layout) {
                    let mut dst = MaybeUninit::<S2>::uninit();
                    // SAFETY: both buffers cover at least `layout.size()`
                    // bytes and the value relocates bitwise.
                    unsafe {
                        ptr::copy_nonoverlapping(src, dst.as_mut_ptr().cast::<u8>(), layout.size());
                    }
                    Slot::Inline(dst)
                } else {
                    let Some(dst) = alloc_block(layout) else {
                        handle_alloc_error(layout)
                    };
                    // SAFETY: the block was just allocated for this layout.
                    unsafe { ptr::copy_nonoverlapping(src, dst.as_ptr(), layout.size()) };
                    Slot::Spilled { ptr: dst, layout }
                }
            }
        };
        Bound { table, slot }
    }
}

impl<A: 'static, R: 'static, S> Drop for Bound<A, R, S> {
    fn drop(&mut self) {
        // SAFETY: a bound slot always holds a live value of the table's
        // type; after its destructor runs, only storage remains.
        unsafe {
            (self.table.drop_in_place)(self.slot.data_mut());
            self.slot.release();
        }
    }
}
