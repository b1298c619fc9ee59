//! Benchmarks for bound queries, refinement and full verification runs.

use bsq::arith::{Interval, Rigorous};
use bsq::{verify_existence, BoundState, Parameters};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn params(modes: usize) -> Parameters {
    Parameters::new(
        Interval::point(1.5),
        Interval::point(3.0),
        Interval::new(-0.01, 0.01),
        vec![Interval::point(1.0)],
        modes,
    )
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    for modes in [6usize, 22, 40] {
        let Ok(state) = BoundState::new(&params(modes), 4, false) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("d", modes), &state, |b, s| {
            b.iter(|| black_box(s.d()));
        });
        group.bench_with_input(BenchmarkId::new("is_bound_1", modes), &state, |b, s| {
            b.iter(|| black_box(s.is_bound(black_box(1))));
        });
    }
    group.finish();
}

fn bench_refine(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine_bounds");
    for modes in [6usize, 22, 40] {
        let Ok(state) = BoundState::new(&params(modes), 4, false) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(modes), &state, |b, s| {
            b.iter(|| {
                let mut s = s.clone();
                black_box(s.refine_bounds())
            });
        });
    }
    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify_existence");
    group.sample_size(10);
    group.bench_function("m22_s10", |b| {
        let p = params(22);
        b.iter(|| black_box(verify_existence(black_box(&p), 10, false)));
    });
    group.finish();
}

criterion_group!(benches, bench_queries, bench_refine, bench_verify);
criterion_main!(benches);
