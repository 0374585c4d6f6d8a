//! Permutation-preserving genetic operators over [`Route`]s.
//!
//! # Crossover
//!
//! - [`order_crossover`] (OX): Davis (1985). Copies a segment of one parent
//!   and fills the remaining positions with the other parent's cities in
//!   their relative order.
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two random positions.
//! - [`two_opt_mutation`]: first-improvement 2-opt local search.
//!
//! Both mutation operators are selectable through [`MutationPolicy`].
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"

use super::route::Route;
use rand::Rng;

/// Improvements smaller than this are ignored by 2-opt, so rounding noise
/// cannot make it cycle.
const TWO_OPT_EPSILON: f64 = 1e-10;

const UNFILLED: usize = usize::MAX;

// ============================================================================
// Crossover
// ============================================================================

/// Order crossover (OX) producing a single child.
///
/// Two cut indices are drawn independently from `0..n`. The child keeps
/// `parent1`'s cities at positions `min(cut)..max(cut)` (half-open; empty
/// when both cuts coincide). Every other position is filled left to right
/// with the cities of `parent2` that the segment did not supply, in
/// `parent2`'s order.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn order_crossover<'a, R: Rng>(parent1: &Route<'a>, parent2: &Route<'a>, rng: &mut R) -> Route<'a> {
    let n = parent1.len();
    if n == 0 {
        return parent1.clone();
    }
    let start = rng.random_range(0..n);
    let end = rng.random_range(0..n);
    order_crossover_with_cuts(parent1, parent2, start, end)
}

/// Order crossover with explicit cut indices.
///
/// `start` and `end` may be given in either order.
///
/// # Panics
/// Panics if the parents have different lengths or a cut exceeds `n`.
pub fn order_crossover_with_cuts<'a>(
    parent1: &Route<'a>,
    parent2: &Route<'a>,
    start: usize,
    end: usize,
) -> Route<'a> {
    let p1 = parent1.order();
    let p2 = parent2.order();
    let n = p1.len();
    assert_eq!(n, p2.len(), "parents must have equal length");
    let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
    assert!(hi <= n, "cut index {hi} out of range for {n} cities");

    let mut child = vec![UNFILLED; n];
    let mut present = vec![false; n];

    for i in lo..hi {
        child[i] = p1[i];
        present[p1[i]] = true;
    }

    let mut slot = 0;
    for &city in p2 {
        if present[city] {
            continue;
        }
        while child[slot] != UNFILLED {
            slot += 1;
        }
        child[slot] = city;
        present[city] = true;
    }

    let child = Route::from_order_unchecked(parent1.registry(), child);
    child.assert_permutation("order crossover");
    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Mutation operator applied to candidate routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MutationPolicy {
    /// [`swap_mutation`].
    #[default]
    Swap,
    /// [`two_opt_mutation`].
    TwoOpt,
}

impl MutationPolicy {
    /// Applies the operator with the given operator-level probability.
    pub fn mutate<R: Rng>(&self, route: &mut Route<'_>, probability: f64, rng: &mut R) {
        match self {
            MutationPolicy::Swap => swap_mutation(route, probability, rng),
            MutationPolicy::TwoOpt => two_opt_mutation(route, probability, rng),
        }
    }
}

impl std::str::FromStr for MutationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swap" => Ok(MutationPolicy::Swap),
            "two-opt" | "2opt" | "2-opt" => Ok(MutationPolicy::TwoOpt),
            other => Err(format!("unknown mutation policy '{other}'")),
        }
    }
}

/// Swap mutation.
///
/// With the given probability, draws two positions and exchanges their
/// cities; equal draws leave the order untouched. The cached length is
/// recomputed in every case.
///
/// # Complexity
/// O(n) for the length refresh
pub fn swap_mutation<R: Rng>(route: &mut Route<'_>, probability: f64, rng: &mut R) {
    let n = route.len();
    if n >= 2 && rng.random_range(0.0..1.0) < probability {
        let i = rng.random_range(0..n);
        let j = rng.random_range(0..n);
        if i != j {
            route.swap_cities(i, j);
            route.assert_permutation("swap mutation");
            return;
        }
    }
    // Unchanged order; refresh anyway so the cache is never stale.
    route.recompute_length();
}

/// 2-opt mutation.
///
/// With the given probability, runs [`two_opt`] on the route. The cached
/// length is recomputed in every case.
pub fn two_opt_mutation<R: Rng>(route: &mut Route<'_>, probability: f64, rng: &mut R) {
    if rng.random_range(0.0..1.0) < probability {
        two_opt(route);
    } else {
        route.recompute_length();
    }
}

/// First-improvement 2-opt local search.
///
/// For tour positions `i < j`, the edges `(a, b) = (t[i], t[i+1])` and
/// `(c, d) = (t[j], t[j+1 mod n])` are replaced by `(a, c)` and `(b, d)`
/// when that shortens the tour, which amounts to reversing `t[i+1..=j]`.
/// Passes repeat until no improving move remains, bounded by `n²` passes.
///
/// The gain is computed from the four edge lengths, which is exact for
/// symmetric distances. On asymmetric tables the reversed segment changes
/// direction, so a move may not pay off; the cached length is always
/// recomputed from scratch at the end.
///
/// Returns the number of moves applied.
///
/// # Complexity
/// O(n²) per pass
pub fn two_opt(route: &mut Route<'_>) -> usize {
    let registry = route.registry();
    let n = route.len();
    let mut moves = 0;

    if n >= 4 {
        for _ in 0..n * n {
            let mut improved = false;
            for i in 0..n - 2 {
                for j in (i + 2)..n {
                    // (a, b) and (c, d) share city a when j wraps to i.
                    if i == 0 && j == n - 1 {
                        continue;
                    }
                    let tour = route.order();
                    let (a, b) = (tour[i], tour[i + 1]);
                    let (c, d) = (tour[j], tour[(j + 1) % n]);
                    let removed = registry.distance(a, b) + registry.distance(c, d);
                    let added = registry.distance(a, c) + registry.distance(b, d);
                    if added + TWO_OPT_EPSILON < removed {
                        route.reverse_segment(i + 1, j);
                        moves += 1;
                        improved = true;
                    }
                }
            }
            if !improved {
                break;
            }
        }
    }

    route.recompute_length();
    route.assert_permutation("2-opt");
    moves
}

// ============================================================================
// Tests
// ============================================================================
