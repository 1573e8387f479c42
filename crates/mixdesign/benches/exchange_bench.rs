//! Criterion benches for the D-optimal coordinate exchange.
//!
//! Candidates are Scheffé lattices of growing order; subset size fixed at 7.
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mixdesign::design::{select_optimal_subset, ExchangeCfg, HullDesign, LatticeDesign};
use nalgebra::dvector;

fn bench_exchange(c: &mut Criterion) {
    let mut group = c.benchmark_group("exchange");
    for &m in &[4usize, 8, 12] {
        let candidates = LatticeDesign::points(3, m).unwrap();
        group.bench_with_input(
            BenchmarkId::new("lattice_k3", candidates.len()),
            &candidates,
            |b, cands| {
                let mut seed = 0u64;
                b.iter(|| {
                    seed += 1;
                    let cfg = ExchangeCfg {
                        seed,
                        ..ExchangeCfg::default()
                    };
                    select_optimal_subset(cands, 7, &cfg)
                })
            },
        );
    }

    let hull = HullDesign::from_percent(vec![
        dvector![70.0, 20.0, 10.0],
        dvector![20.0, 70.0, 10.0],
        dvector![10.0, 20.0, 70.0],
        dvector![40.0, 10.0, 50.0],
    ])
    .unwrap();
    group.bench_function("hull_quad_n5", |b| {
        b.iter(|| select_optimal_subset(hull.candidates(), 5, &ExchangeCfg::default()))
    });
    group.finish();
}

criterion_group!(benches, bench_exchange);
criterion_main!(benches);
