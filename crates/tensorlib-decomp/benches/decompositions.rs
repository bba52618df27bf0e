//! Performance benchmarks for CP-ALS and Tucker-ALS
//!
//! Run with: cargo bench -p tensorlib-decomp

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scirs2_core::random::{rngs::StdRng, SeedableRng};
use tensorlib_core::DenseND;
use tensorlib_decomp::{
    cp, cp_als_3way, cp_als_nway, hosvd_factors, random_factors, tucker, DecompConfig,
    InitStrategy,
};

fn fixed_config(rank: usize) -> DecompConfig {
    // tol = 0 pins the sweep count to max_iter
    DecompConfig::new(rank)
        .with_tol(0.0)
        .with_max_iter(10)
        .with_init(InitStrategy::Random)
        .with_random_state(0)
}

fn bench_cp(c: &mut Criterion) {
    let mut group = c.benchmark_group("cp_als");

    for &(size, rank) in &[(16, 4), (32, 8), (48, 8)] {
        let tensor = DenseND::<f64>::random_uniform(&[size, size, size], 0.0, 1.0);
        let config = fixed_config(rank);

        group.throughput(Throughput::Elements((size * size * size) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}^3_r{}", size, rank)),
            &tensor,
            |b, tensor| b.iter(|| black_box(cp(black_box(tensor), &config))),
        );
    }
    group.finish();
}

fn bench_cp_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("cp_als_paths");
    let tensor = DenseND::<f64>::random_uniform(&[32, 32, 32], 0.0, 1.0);
    let mut rng = StdRng::seed_from_u64(3);
    let start = random_factors::<f64, _>(tensor.shape(), 8, &mut rng);

    group.bench_function("nway", |b| {
        b.iter(|| black_box(cp_als_nway(&tensor, start.clone(), 0.0, 10)))
    });
    group.bench_function("3way", |b| {
        b.iter(|| black_box(cp_als_3way(&tensor, start.clone(), 0.0, 10)))
    });
    group.finish();
}

fn bench_tucker(c: &mut Criterion) {
    let mut group = c.benchmark_group("tucker_als");

    for &(size, rank) in &[(16, 4), (24, 6), (32, 8)] {
        let tensor = DenseND::<f64>::random_uniform(&[size, size, size], 0.0, 1.0);
        let config = fixed_config(rank);

        group.throughput(Throughput::Elements((size * size * size) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}^3_r{}", size, rank)),
            &tensor,
            |b, tensor| b.iter(|| black_box(tucker(black_box(tensor), &config))),
        );
    }
    group.finish();
}

fn bench_hosvd(c: &mut Criterion) {
    let mut group = c.benchmark_group("hosvd_init");

    for &size in &[16, 32, 48] {
        let tensor = DenseND::<f64>::random_uniform(&[size, size, size], 0.0, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &tensor, |b, tensor| {
            b.iter(|| black_box(hosvd_factors(tensor, 8)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cp, bench_cp_paths, bench_tucker, bench_hosvd);
criterion_main!(benches);
