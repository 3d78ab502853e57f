use std::{
    alloc::{self, Layout},
    mem::MaybeUninit,
    ptr::{self, NonNull},
};

use crate::error::SpillError;

/// Where a wrapper currently keeps its callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// No callable is stored.
    Empty,
    /// The callable lives in the wrapper's inline buffer.
    Inline,
    /// The callable was too large or too aligned for the inline buffer and
    /// lives in its own heap block.
    Spilled,
}

/// Type-erased storage for one callable: the inline buffer shaped like `S`,
/// or an owned heap block of the callable's exact layout.
///
/// A slot never runs the stored callable's destructor; the operation table
/// bound next to it owns that. The slot's only cleanup duty is freeing a
/// spilled block, and even that is explicit via [`Slot::release`] so the
/// owner controls ordering.
pub(crate) enum Slot<S> {
    Inline(MaybeUninit<S>),
    Spilled { ptr: NonNull<u8>, layout: Layout },
}

/// Allocates backing storage for `layout`, or `None` when the allocator
/// refuses. Zero-size layouts get a dangling, well-aligned pointer and no
/// real allocation, per the global allocator's contract.
pub(crate) fn alloc_block(layout: Layout) -> Option<NonNull<u8>> {
    if layout.size() == 0 {
        // Alignment is always nonzero, so this pointer is never null.
        let dangling = ptr::without_provenance_mut::<u8>(layout.align());
        return Some(unsafe { NonNull::new_unchecked(dangling) });
    }
    // SAFETY: the layout has nonzero size, checked above.
    NonNull::new(unsafe { alloc::alloc(layout) })
}

impl<S> Slot<S> {
    /// Whether a value with `layout` would be stored inline.
    pub(crate) const fn layout_fits_inline(layout: Layout) -> bool {
        layout.size() <= size_of::<S>() && layout.align() <= align_of::<S>()
    }

    /// Whether a value of type `F` would be stored inline.
    pub(crate) const fn fits_inline<F>() -> bool {
        Self::layout_fits_inline(Layout::new::<F>())
    }

    /// Stores `value`, choosing inline or spilled placement by its layout.
    ///
    /// Allocation failure diverts through [`alloc::handle_alloc_error`],
    /// matching the standard collections.
    pub(crate) fn place<F>(value: F) -> Self {
        match Self::try_place(value) {
            Ok(slot) => slot,
            Err(_) => alloc::handle_alloc_error(Layout::new::<F>()),
        }
    }

    /// Stores `value`, reporting allocation failure instead of diverting.
    ///
    /// On failure the value is dropped and no slot is produced.
    pub(crate) fn try_place<F>(value: F) -> Result<Self, SpillError> {
        if Self::fits_inline::<F>() {
            let mut buf = MaybeUninit::<S>::uninit();
            // SAFETY: `F` fits the buffer's size and alignment, checked
            // above; writing through the erased pointer keeps `F` and `S`
            // unrelated types.
            unsafe { buf.as_mut_ptr().cast::<F>().write(value) };
            return Ok(Slot::Inline(buf));
        }
        let layout = Layout::new::<F>();
        let Some(ptr) = alloc_block(layout) else {
            return Err(SpillError {
                size: layout.size(),
            });
        };
        // SAFETY: the block was just allocated for exactly this layout.
        unsafe { ptr.as_ptr().cast::<F>().write(value) };
        Ok(Slot::Spilled { ptr, layout })
    }

    /// Uninitialized storage with the same placement decision a value of
    /// `layout` would get. Used as a clone destination.
    pub(crate) fn alloc_matching(layout: Layout) -> Result<Self, SpillError> {
        if Self::layout_fits_inline(layout) {
            return Ok(Slot::Inline(MaybeUninit::uninit()));
        }
        match alloc_block(layout) {
            Some(ptr) => Ok(Slot::Spilled { ptr, layout }),
            None => Err(SpillError {
                size: layout.size(),
            }),
        }
    }

    /// Erased address of the stored value.
    pub(crate) fn data(&self) -> *const u8 {
        match self {
            Slot::Inline(buf) => buf.as_ptr().cast(),
            Slot::Spilled { ptr, .. } => ptr.as_ptr(),
        }
    }

    /// Erased mutable address of the stored value.
    pub(crate) fn data_mut(&mut self) -> *mut u8 {
        match self {
            Slot::Inline(buf) => buf.as_mut_ptr().cast(),
            Slot::Spilled { ptr, .. } => ptr.as_ptr(),
        }
    }

    /// Storage state as reported to users; the empty case is represented by
    /// the wrapper holding no slot at all.
    pub(crate) fn storage(&self) -> Storage {
        match self {
            Slot::Inline(_) => Storage::Inline,
            Slot::Spilled { .. } => Storage::Spilled,
        }
    }

    /// Frees a spilled block without touching the stored value, leaving the
    /// slot as vacant inline storage.
    ///
    /// # Safety
    ///
    /// The stored value must already have been dropped or moved out.
    pub(crate) unsafe fn release(&mut self) {
        if let Slot::Spilled { ptr, layout } = *self {
            if layout.size() != 0 {
                // SAFETY: the block came from `alloc_block` with this exact
                // layout and has not been freed.
                unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
            }
            *self = Slot::Inline(MaybeUninit::uninit());
        }
    }
}
