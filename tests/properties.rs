//! Property tests for the permutation and length invariants.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tsp_evolve::cities::CityRegistry;
use tsp_evolve::ga::operators::{order_crossover, order_crossover_with_cuts, swap_mutation, two_opt};
use tsp_evolve::ga::{Population, Route, Tournament};

fn registry(points: &[(f64, f64)]) -> CityRegistry {
    CityRegistry::from_coordinates(
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| (format!("c{i}"), x, y)),
    )
    .unwrap()
}

fn recomputed(route: &Route<'_>) -> f64 {
    let mut fresh = route.clone();
    fresh.recompute_length();
    fresh.length()
}

fn points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0..100.0f64, 0.0..100.0f64), 1..30)
}

proptest! {
    #[test]
    fn crossover_yields_permutation(pts in points(), seed in any::<u64>()) {
        let reg = registry(&pts);
        let mut rng = StdRng::seed_from_u64(seed);
        let p1 = Route::random(&reg, &mut rng);
        let p2 = Route::random(&reg, &mut rng);

        let child = order_crossover(&p1, &p2, &mut rng);
        prop_assert!(child.validate().is_ok());
        prop_assert_eq!(child.length(), recomputed(&child));
    }

    #[test]
    fn crossover_keeps_parent1_segment(pts in points(), seed in any::<u64>(), a in 0usize..30, b in 0usize..30) {
        let reg = registry(&pts);
        let n = reg.len();
        let (a, b) = (a % n, b % n);
        let mut rng = StdRng::seed_from_u64(seed);
        let p1 = Route::random(&reg, &mut rng);
        let p2 = Route::random(&reg, &mut rng);

        let child = order_crossover_with_cuts(&p1, &p2, a, b);
        let (lo, hi) = (a.min(b), a.max(b));
        prop_assert_eq!(&child.order()[lo..hi], &p1.order()[lo..hi]);
        prop_assert!(child.validate().is_ok());
    }

    #[test]
    fn crossover_of_identical_parents_is_identity(pts in points(), seed in any::<u64>()) {
        let reg = registry(&pts);
        let mut rng = StdRng::seed_from_u64(seed);
        let parent = Route::random(&reg, &mut rng);
        let child = order_crossover(&parent, &parent, &mut rng);
        prop_assert_eq!(child.order(), parent.order());
    }

    #[test]
    fn swap_mutation_keeps_invariants(pts in points(), seed in any::<u64>(), p in 0.0..=1.0f64) {
        let reg = registry(&pts);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut route = Route::random(&reg, &mut rng);
        for _ in 0..10 {
            swap_mutation(&mut route, p, &mut rng);
            prop_assert!(route.validate().is_ok());
            prop_assert_eq!(route.length(), recomputed(&route));
        }
    }

    #[test]
    fn two_opt_keeps_invariants_and_never_lengthens(pts in points(), seed in any::<u64>()) {
        let reg = registry(&pts);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut route = Route::random(&reg, &mut rng);
        let before = route.length();
        two_opt(&mut route);
        prop_assert!(route.validate().is_ok());
        prop_assert_eq!(route.length(), recomputed(&route));
        prop_assert!(route.length() <= before + 1e-6);
    }

    #[test]
    fn tournament_winner_not_worse_than_population_max(pts in points(), seed in any::<u64>(), k in 1usize..10) {
        let reg = registry(&pts);
        let mut rng = StdRng::seed_from_u64(seed);
        let pop = Population::random(&reg, 12, &mut rng).unwrap();
        let worst = pop.routes().iter().map(|r| r.length()).fold(0.0, f64::max);

        let winner = Tournament::new(k).unwrap().select(&pop, &mut rng);
        prop_assert!(winner.length() <= worst);
        prop_assert!(winner.length() >= pop.fittest().length());
    }
}
