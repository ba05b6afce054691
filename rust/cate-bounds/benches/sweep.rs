use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use cate_bounds::estimator::{estimate_bounds, BoundBuffers};
use cate_bounds::rng::{RngSource, Sampler};
use cate_bounds::sweep::log_gamma_grid;
use cate_bounds::{generate_dataset, Dataset, LowDimCovariates, PensionCovariates, Sweep};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for n in [1_000usize, 10_000] {
        group.bench_with_input(BenchmarkId::new("low_dim", n), &n, |b, &n| {
            b.iter(|| {
                let mut s = Sampler::new(RngSource::seeded(1));
                generate_dataset::<LowDimCovariates, _>(n, &mut s).unwrap()
            });
        });
        group.bench_with_input(BenchmarkId::new("pension", n), &n, |b, &n| {
            b.iter(|| {
                let mut s = Sampler::new(RngSource::seeded(1));
                generate_dataset::<PensionCovariates, _>(n, &mut s).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate_bounds");
    let mut s = Sampler::new(RngSource::seeded(2));
    let data: Dataset<LowDimCovariates> = generate_dataset(10_000, &mut s).unwrap();
    let mut buf = BoundBuffers::new(data.len()).unwrap();

    for log_gamma in [0.0, 1.0] {
        group.bench_with_input(BenchmarkId::from_parameter(log_gamma), &log_gamma, |b, &lg| {
            b.iter(|| estimate_bounds(&data, lg, &mut buf).unwrap());
        });
    }

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    group.sample_size(20);
    let mut s = Sampler::new(RngSource::seeded(3));
    let data: Dataset<LowDimCovariates> = generate_dataset(10_000, &mut s).unwrap();
    let mut sweep = Sweep::new(&data, log_gamma_grid(10, 0.1)).unwrap();

    group.bench_function("full_grid", |b| {
        b.iter(|| sweep.run(&data, &mut std::io::sink()).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_estimate, bench_sweep);
criterion_main!(benches);
