#![allow(clippy::all)] // Clippy will attempt to remove black_box() internals

use criterion::*;
use gridgen::*;
use tabint::{
    group_one_function, group_three_functions, group_two_functions, GroupNorm, Interpolation,
    QuadratureSettings,
};

const LAWS: [Interpolation; 5] = [
    Interpolation::LinLin,
    Interpolation::LogLin,
    Interpolation::LinLog,
    Interpolation::LogLog,
    Interpolation::Flat,
];

fn bench_integrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Integrate");
    for size in [10, 100, 1000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        for interp in LAWS {
            group.bench_with_input(
                BenchmarkId::new(format!("Domain {interp}"), size),
                &size,
                |b, &size| {
                    let f = gen_function(size, interp.clone());
                    let (lo, hi) = f.domain().unwrap();
                    let (lo, hi) = (lo + 0.1 * (hi - lo), hi - 0.1 * (hi - lo));
                    b.iter(|| black_box(f.integrate(black_box(lo), black_box(hi)).unwrap()));
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("Weighted x lin-lin", size), &size, |b, &size| {
            let f = gen_function(size, Interpolation::LinLin);
            b.iter(|| black_box(f.integrate_domain_with_weight_x().unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("Running log-log", size), &size, |b, &size| {
            let f = gen_function(size, Interpolation::LogLog);
            b.iter(|| black_box(f.running_integral().unwrap()));
        });
    }
    group.finish();
}

fn bench_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("Group");
    for size in [100, 1000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        let bounds = gen_bounds(size / 10);

        group.bench_with_input(BenchmarkId::new("One function", size), &size, |b, &size| {
            let f = gen_function(size, Interpolation::LogLog);
            b.iter(|| black_box(group_one_function(&f, &bounds, GroupNorm::Dx).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("Two functions", size), &size, |b, &size| {
            let f = gen_function(size, Interpolation::LogLog);
            let g = gen_function(size / 2, Interpolation::LinLin);
            b.iter(|| black_box(group_two_functions(&f, &g, &bounds, GroupNorm::Dx).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("Three functions", size), &size, |b, &size| {
            let f = gen_function(size, Interpolation::LogLog);
            let g = gen_function(size / 2, Interpolation::LinLin);
            let h = gen_function(size / 3, Interpolation::Flat);
            b.iter(|| {
                black_box(group_three_functions(&f, &g, &h, &bounds, GroupNorm::None).unwrap())
            });
        });
    }
    group.finish();
}

fn bench_with_function(c: &mut Criterion) {
    let mut group = c.benchmark_group("With Function");
    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        for degree in [4, 10, 20] {
            group.bench_with_input(
                BenchmarkId::new(format!("Degree {degree}"), size),
                &size,
                |b, &size| {
                    let f = gen_function(size, Interpolation::LinLin);
                    let (lo, hi) = f.domain().unwrap();
                    let settings = QuadratureSettings::default().with_degree(degree);
                    b.iter(|| {
                        black_box(
                            f.integrate_with_function(|x: f64| Ok(x.sqrt()), lo, hi, &settings)
                                .unwrap(),
                        )
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches_integrate, bench_integrate);
criterion_group!(benches_group, bench_group);
criterion_group!(benches_with_function, bench_with_function);
criterion_main!(benches_integrate, benches_group, benches_with_function);

mod randn {
    use rand::distr::{Distribution, StandardUniform};
    use rand::rngs::StdRng;
    use rand::Rng;
    use rand::SeedableRng;

    /// Fixed random seed to support repeatable testing
    const SEED: [u8; 32] = [
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7,
        6, 5, 4, 3, 2, 1,
    ];

    /// Get a random number generator with a const seed for repeatable testing
    pub fn rng_fixed_seed() -> StdRng {
        StdRng::from_seed(SEED)
    }

    /// Generate `n` random numbers using provided generator
    pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
    where
        StandardUniform: Distribution<T>,
    {
        (0..n).map(|_| rng.random::<T>()).collect()
    }
}

mod gridgen {
    use super::randn::*;
    use tabint::utils::geomspace;
    use tabint::{Interpolation, PointwiseXY};

    // Generate a positive function on a jittered log-spaced grid over
    // [1e-5, 2e7], usable with every interpolation law.
    pub fn gen_function(size: usize, interp: Interpolation) -> PointwiseXY<f64> {
        let mut rng = rng_fixed_seed();
        let mut x = geomspace(1e-5, 2e7, size).unwrap();
        let noise = randn::<f64>(&mut rng, size);
        (1..size - 1).for_each(|i| x[i] *= 1.0 + 1e-3 * (noise[i] - 0.5));
        let y = randn::<f64>(&mut rng, size);
        let y: Vec<f64> = y.iter().map(|v| 0.1 + v).collect();
        PointwiseXY::from_xy(&x, &y, interp).unwrap()
    }

    // Group boundaries spanning a little less than the functions' domain
    pub fn gen_bounds(bins: usize) -> Vec<f64> {
        geomspace(1e-4, 1e7, bins + 1).unwrap()
    }
}
