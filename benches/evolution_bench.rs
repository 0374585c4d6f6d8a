//! Criterion benchmarks for the TSP genetic algorithm.
//!
//! Uses random Euclidean instances to measure operator and loop overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tsp_evolve::cities::CityRegistry;
use tsp_evolve::ga::operators::{order_crossover, swap_mutation, two_opt};
use tsp_evolve::ga::{EvolutionConfig, EvolutionController, Route};

fn random_instance(n: usize, seed: u64) -> CityRegistry {
    let mut rng = StdRng::seed_from_u64(seed);
    CityRegistry::from_coordinates(
        (0..n).map(|i| (format!("c{i}"), rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0))),
    )
    .expect("valid instance")
}

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("operators");
    for n in [37, 100, 500] {
        let registry = random_instance(n, 42);
        let mut rng = StdRng::seed_from_u64(1);
        let p1 = Route::random(&registry, &mut rng);
        let p2 = Route::random(&registry, &mut rng);

        group.bench_with_input(BenchmarkId::new("order_crossover", n), &n, |b, _| {
            b.iter(|| order_crossover(black_box(&p1), black_box(&p2), &mut rng))
        });
        group.bench_with_input(BenchmarkId::new("swap_mutation", n), &n, |b, _| {
            let mut route = p1.clone();
            b.iter(|| swap_mutation(black_box(&mut route), 1.0, &mut rng))
        });
    }
    for n in [37, 100] {
        let registry = random_instance(n, 42);
        let mut rng = StdRng::seed_from_u64(2);
        group.bench_with_input(BenchmarkId::new("two_opt", n), &n, |b, _| {
            b.iter(|| {
                let mut route = Route::random(&registry, &mut rng);
                two_opt(black_box(&mut route))
            })
        });
    }
    group.finish();
}

fn bench_evolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolution");
    group.sample_size(10);
    for n in [37, 100] {
        let registry = random_instance(n, 7);
        for parallel in [false, true] {
            let config = EvolutionConfig::default()
                .with_population_size(200)
                .with_generations(50)
                .with_parallel(parallel)
                .with_seed(42);
            let controller = EvolutionController::new(&registry, config).expect("valid config");
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, n), &n, |b, _| {
                b.iter(|| controller.run().expect("run"))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_operators, bench_evolution);
criterion_main!(benches);
