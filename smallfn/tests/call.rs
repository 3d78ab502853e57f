use approx::assert_relative_eq;
use smallfn::{EmptyCallError, SmallFn, Storage, UniqueFn};
use static_assertions::{assert_impl_all, assert_not_impl_any};

assert_impl_all!(SmallFn<dyn Fn() -> bool>: Clone, Default);
assert_not_impl_any!(UniqueFn<dyn Fn() -> bool>: Clone);
assert_not_impl_any!(SmallFn<dyn Fn()>: Send, Sync);
assert_not_impl_any!(UniqueFn<dyn FnMut(i32) -> i32>: Send, Sync);

fn returns_true() -> bool {
    true
}

fn returns_false() -> bool {
    false
}

struct Turnstile {
    entries: usize,
}

impl Turnstile {
    fn admit(&mut self) -> usize {
        self.entries += 1;
        self.entries
    }
}

#[test]
fn closures_pass_arguments_through() {
    let passthrough: SmallFn<dyn Fn(bool) -> bool> = SmallFn::new(|x| x);
    assert!(!passthrough.is_empty());
    assert!(passthrough.call((true,)));
    assert!(!passthrough.call((false,)));
}

#[test]
fn captured_state_is_visible_through_shared_calls() {
    let captured = 0x12345;
    let f: SmallFn<dyn Fn() -> i32> = SmallFn::new(move || captured);
    assert_eq!(f.call(()), 0x12345);
    assert_eq!(f.call(()), 0x12345);
}

#[test]
fn mutable_calls_step_captured_state() {
    let mut counter = 0;
    let mut next: UniqueFn<dyn FnMut() -> i32> = UniqueFn::new(move || {
        let value = counter;
        counter += 1;
        value
    });
    assert_eq!(next.call_mut(()), 0);
    assert_eq!(next.call_mut(()), 1);
    assert_eq!(next.call_mut(()), 2);
}

#[test]
fn shared_wrappers_support_every_call_mode() {
    let mut f: SmallFn<dyn Fn(i32) -> i32> = SmallFn::new(|x| x + 1);
    assert_eq!(f.call((1,)), 2);
    assert_eq!(f.call_mut((2,)), 3);
    assert_eq!(f.call_once((3,)), 4);
}

#[test]
fn consuming_calls_release_the_callable() {
    let message = String::from("deferred");
    let f: UniqueFn<dyn FnOnce() -> String> = UniqueFn::new(move || message);
    assert_eq!(f.call_once(()), "deferred");
}

#[test]
fn function_pointers_are_ordinary_callables() {
    let mut f: SmallFn<dyn Fn() -> bool> = SmallFn::new(returns_true);
    assert!(f.call(()));
    f = SmallFn::new(returns_false);
    assert!(!f.call(()));
}

#[test]
fn bound_methods_work_through_closures() {
    let mut gate = Turnstile { entries: 0 };
    let mut admit: UniqueFn<dyn FnMut() -> usize> = UniqueFn::new(move || gate.admit());
    assert_eq!(admit.call_mut(()), 1);
    assert_eq!(admit.call_mut(()), 2);
}

#[test]
fn default_wrappers_are_empty() {
    let f: SmallFn<dyn Fn()> = SmallFn::default();
    assert!(f.is_empty());
    assert_eq!(f.storage(), Storage::Empty);

    let g: UniqueFn<dyn FnOnce()> = UniqueFn::default();
    assert!(g.is_empty());
}

#[test]
#[should_panic(expected = "invoked an empty smallfn wrapper")]
fn calling_an_empty_wrapper_panics() {
    let f: SmallFn<dyn Fn()> = SmallFn::empty();
    f.call(());
}

#[test]
#[should_panic(expected = "invoked an empty smallfn wrapper")]
fn consuming_an_empty_wrapper_panics() {
    let f: UniqueFn<dyn FnOnce() -> i32> = UniqueFn::empty();
    f.call_once(());
}

#[test]
fn try_calls_report_emptiness() {
    let mut f: UniqueFn<dyn FnMut(i32) -> i32> = UniqueFn::empty();
    assert_eq!(f.try_call_mut((3,)), Err(EmptyCallError));

    f = UniqueFn::new(|x| x * 2);
    assert_eq!(f.try_call_mut((3,)), Ok(6));

    let empty = SmallFn::<dyn FnOnce() -> i32>::empty();
    assert!(matches!(empty.try_call_once(()), Err(EmptyCallError)));
}

#[test]
fn clear_empties_a_bound_wrapper() {
    let mut f: SmallFn<dyn Fn() -> bool> = SmallFn::new(|| true);
    assert!(!f.is_empty());
    f.clear();
    assert!(f.is_empty());
    assert!(matches!(f.try_call(()), Err(EmptyCallError)));
}

#[test]
fn reassignment_rebinds_the_wrapper() {
    let mut f: SmallFn<dyn Fn(i32) -> i32> = SmallFn::new(|x| x + 1);
    assert_eq!(f.call((0,)), 1);
    f = SmallFn::new(|x| x - 1);
    assert_eq!(f.call((0,)), -1);
}

#[test]
fn float_results_flow_through_erased_calls() {
    let half: SmallFn<dyn Fn(f64) -> f64> = SmallFn::new(|x| x * 0.5);
    assert_relative_eq!(half.call((3.0,)), 1.5);
}

#[test]
fn eight_argument_signatures_are_supported() {
    let sum: SmallFn<dyn Fn(u8, u8, u8, u8, u8, u8, u8, u8) -> u32> =
        SmallFn::new(|a, b, c, d, e, f, g, h| {
            [a, b, c, d, e, f, g, h].iter().map(|&x| u32::from(x)).sum()
        });
    assert_eq!(sum.call((1, 2, 3, 4, 5, 6, 7, 8)), 36);
}
