//! Call and construction overhead compared against plain closures and
//! boxed closures, the two shapes a wrapper usually replaces.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use smallfn::SmallFn;

fn bench_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("call");
    let base = 3u64;

    let plain = move |x: u64| x.wrapping_mul(base);
    group.bench_function("plain_closure", |b| b.iter(|| plain(black_box(7))));

    let boxed: Box<dyn Fn(u64) -> u64> = Box::new(move |x| x.wrapping_mul(base));
    group.bench_function("boxed_closure", |b| b.iter(|| boxed(black_box(7))));

    let inline: SmallFn<dyn Fn(u64) -> u64> = SmallFn::new(move |x: u64| x.wrapping_mul(base));
    group.bench_function("small_fn_inline", |b| b.iter(|| inline.call((black_box(7),))));

    let payload = [3u64; 32];
    let spilled: SmallFn<dyn Fn(u64) -> u64> =
        SmallFn::new(move |x: u64| x.wrapping_mul(payload[0]));
    group.bench_function("small_fn_spilled", |b| {
        b.iter(|| spilled.call((black_box(7),)))
    });

    group.finish();
}

fn bench_construct_and_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct_and_call");

    group.bench_function("boxed_closure", |b| {
        b.iter(|| {
            let x = black_box(5u64);
            let f: Box<dyn Fn() -> u64> = Box::new(move || x);
            black_box(f())
        });
    });

    group.bench_function("small_fn_inline", |b| {
        b.iter(|| {
            let x = black_box(5u64);
            let f: SmallFn<dyn Fn() -> u64> = SmallFn::new(move || x);
            black_box(f.call(()))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_call, bench_construct_and_call);
criterion_main!(benches);
