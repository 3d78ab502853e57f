use std::{cell::Cell, mem, rc::Rc};

use smallfn::{EmptyCallError, S0, S1, S2, S4, S32, SmallFn, Storage, UniqueFn};

struct DropFlag(Rc<Cell<bool>>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

#[derive(Clone)]
#[repr(align(64))]
struct OveralignedTag;

#[test]
fn cloned_value_captures_diverge() {
    let mut count = 0;
    let mut right: SmallFn<dyn FnMut() -> i32> = SmallFn::new(move || {
        let value = count;
        count += 1;
        value
    });
    assert_eq!(right.call_mut(()), 0);
    assert_eq!(right.call_mut(()), 1);
    assert_eq!(right.call_mut(()), 2);

    let mut left = right.clone();
    assert_eq!(left.call_mut(()), 3);
    assert_eq!(left.call_mut(()), 4);

    // The original keeps counting from its own state.
    assert_eq!(right.call_mut(()), 3);
    assert_eq!(right.call_mut(()), 4);
    assert_eq!(left.call_mut(()), 5);
}

#[test]
fn shared_captures_stay_shared_across_clones() {
    let hits = Rc::new(Cell::new(0));
    let observer = Rc::clone(&hits);
    let bump: SmallFn<dyn Fn()> = SmallFn::new(move || observer.set(observer.get() + 1));

    let also_bump = bump.clone();
    bump.call(());
    also_bump.call(());

    assert_eq!(hits.get(), 2);
    assert_eq!(Rc::strong_count(&hits), 3);
}

#[test]
fn moves_do_not_clone_captured_state() {
    let store = Rc::new(0x4711);
    let keeper = Rc::clone(&store);
    let f: UniqueFn<dyn Fn() -> usize> = UniqueFn::new(move || *keeper);
    assert_eq!(Rc::strong_count(&store), 2);

    let moved = f;
    assert_eq!(moved.call(()), 0x4711);
    assert_eq!(Rc::strong_count(&store), 2);
}

#[test]
fn take_leaves_an_empty_wrapper_behind() {
    let mut slot: SmallFn<dyn Fn() -> bool> = SmallFn::new(|| true);
    let taken = mem::take(&mut slot);

    assert!(slot.is_empty());
    assert!(matches!(slot.try_call(()), Err(EmptyCallError)));
    assert!(taken.call(()));
}

#[test]
fn wrappers_swap_like_plain_values() {
    let mut a: SmallFn<dyn Fn() -> i32> = SmallFn::new(|| 1);
    let mut b: SmallFn<dyn Fn() -> i32> = SmallFn::new(|| 2);
    mem::swap(&mut a, &mut b);
    assert_eq!(a.call(()), 2);
    assert_eq!(b.call(()), 1);
}

#[test]
fn reassignment_drops_the_previous_callable() {
    let dropped = Rc::new(Cell::new(false));
    let flag = DropFlag(Rc::clone(&dropped));
    let mut f: UniqueFn<dyn Fn() -> bool> = UniqueFn::new(move || !flag.0.get());

    assert!(f.call(()));
    assert!(!dropped.get());

    f = UniqueFn::new(|| false);
    assert!(dropped.get());
    assert!(!f.call(()));
}

#[test]
fn clear_drops_a_spilled_callable() {
    let dropped = Rc::new(Cell::new(false));
    let flag = DropFlag(Rc::clone(&dropped));
    let padding = [0u8; 256];
    let mut f: UniqueFn<dyn Fn() -> bool> = UniqueFn::new(move || {
        let _ = (&flag, &padding);
        true
    });
    assert_eq!(f.storage(), Storage::Spilled);

    f.clear();
    assert!(dropped.get());
    assert!(f.is_empty());
}

#[test]
fn small_captures_stay_inline() {
    let x = 5u64;
    let f: SmallFn<dyn Fn() -> u64> = SmallFn::new(move || x);
    assert_eq!(f.storage(), Storage::Inline);
}

#[test]
fn large_captures_spill_and_still_clone() {
    let big: [u64; 32] = std::array::from_fn(|i| i as u64);
    let f: SmallFn<dyn Fn() -> u64> = SmallFn::new(move || big.iter().sum());
    assert_eq!(f.storage(), Storage::Spilled);

    let g = f.clone();
    assert_eq!(g.storage(), Storage::Spilled);
    assert_eq!(f.call(()), 496);
    assert_eq!(g.call(()), 496);
}

#[test]
fn capture_free_closures_fit_any_space() {
    let f: SmallFn<dyn Fn(i32) -> i32, S0> = SmallFn::new(|x| x * 3);
    assert_eq!(f.storage(), Storage::Inline);
    assert_eq!(f.call((2,)), 6);
}

#[test]
fn over_aligned_zero_sized_captures_take_the_spill_path() {
    let tag = OveralignedTag;
    let f: SmallFn<dyn Fn() -> bool, S1> = SmallFn::new(move || {
        let _ = &tag;
        true
    });
    assert_eq!(f.storage(), Storage::Spilled);
    assert!(f.call(()));

    let g = f.clone();
    assert!(g.call(()));
}

#[test]
fn resize_moves_inline_state_between_spaces() {
    let pair = (1u64, 2u64);
    let f: SmallFn<dyn Fn() -> u64, S4> = SmallFn::new(move || pair.0 + pair.1);
    assert_eq!(f.storage(), Storage::Inline);

    let f: SmallFn<dyn Fn() -> u64, S2> = f.resize();
    assert_eq!(f.storage(), Storage::Inline);
    assert_eq!(f.call(()), 3);

    let f: SmallFn<dyn Fn() -> u64, S0> = f.resize();
    assert_eq!(f.storage(), Storage::Spilled);
    assert_eq!(f.call(()), 3);
}

#[test]
fn resize_keeps_spilled_state_spilled() {
    let big: [u64; 32] = std::array::from_fn(|i| i as u64);
    let f: SmallFn<dyn Fn() -> u64, S4> = SmallFn::new(move || big.iter().sum());
    assert_eq!(f.storage(), Storage::Spilled);

    let f: SmallFn<dyn Fn() -> u64, S32> = f.resize();
    assert_eq!(f.storage(), Storage::Spilled);
    assert_eq!(f.call(()), 496);
}

#[test]
fn resize_preserves_emptiness() {
    let f: UniqueFn<dyn FnMut() -> i32, S4> = UniqueFn::empty();
    let f: UniqueFn<dyn FnMut() -> i32, S1> = f.resize();
    assert!(f.is_empty());
}
