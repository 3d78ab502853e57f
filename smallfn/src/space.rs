//! Inline capacity descriptors.
//!
//! A space is any type whose size and alignment define how much callable
//! state a wrapper keeps inline before spilling to the heap. The aliases
//! here cover the usual word counts; custom types work just as well when an
//! unusual size or alignment is needed.

/// No inline capacity: every callable with state spills to the heap.
pub type S0 = [usize; 0];

/// One machine word of inline capacity.
pub type S1 = [usize; 1];

/// Two machine words of inline capacity.
pub type S2 = [usize; 2];

/// Four machine words of inline capacity.
pub type S4 = [usize; 4];

/// Eight machine words of inline capacity.
pub type S8 = [usize; 8];

/// Sixteen machine words of inline capacity.
pub type S16 = [usize; 16];

/// Thirty-two machine words of inline capacity.
pub type S32 = [usize; 32];

/// Capacity used when none is specified: four machine words, enough for a
/// boxed callable, a fat pointer pair, or a few captured words.
pub type DefaultSpace = S4;

#[cfg(test)]
mod tests {
    use static_assertions::const_assert;

    use super::*;

    const_assert!(size_of::<S0>() == 0);
    const_assert!(size_of::<S1>() == size_of::<usize>());
    const_assert!(size_of::<DefaultSpace>() == 4 * size_of::<usize>());
    const_assert!(align_of::<S0>() == align_of::<usize>());
}
