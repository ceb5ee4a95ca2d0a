//! Benchmarks for galaxy generation.
//!
//! Run with: `cargo bench -p galaxy_points`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use galaxy_points::prelude::*;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(20);

    for count in [10_000u32, 100_000, 1_000_000] {
        let params = GalaxyParameters {
            count,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new("parallel", count), &params, |b, params| {
            b.iter(|| black_box(generate(params).unwrap()))
        });
        group.bench_with_input(
            BenchmarkId::new("sequential", count),
            &params,
            |b, params| {
                let mut rng = RngSource::thread();
                b.iter(|| black_box(generate_with(params, &mut rng).unwrap()))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
