//! Tournament selection.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use super::population::Population;
use super::route::Route;
use crate::error::{Error, Result};
use rand::Rng;

/// Tournament selection: draw `size` members uniformly **with replacement**
/// and keep the shortest.
///
/// Larger tournaments mean stronger selection pressure; weak routes keep a
/// nonzero chance of being picked as long as `size` is finite.
///
/// Ties go to the earliest draw.
///
/// # Examples
///
/// ```
/// use tsp_evolve::ga::Tournament;
///
/// let t = Tournament::new(7).unwrap();
/// assert_eq!(t.size(), 7);
/// assert!(Tournament::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tournament {
    size: usize,
}

impl Default for Tournament {
    fn default() -> Self {
        Self { size: 7 }
    }
}

impl Tournament {
    pub fn new(size: usize) -> Result<Self> {
        if size < 1 {
            return Err(Error::config("tournament_size must be at least 1"));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the index of the tournament winner.
    ///
    /// # Complexity
    /// O(size)
    pub fn select_index<R: Rng>(&self, population: &Population<'_>, rng: &mut R) -> usize {
        tournament(population.routes(), self.size, rng)
    }

    /// Returns the tournament winner.
    pub fn select<'p, 'a, R: Rng>(&self, population: &'p Population<'a>, rng: &mut R) -> &'p Route<'a> {
        &population.routes()[self.select_index(population, rng)]
    }
}

/// Draws `k` indices into `routes` and returns the shortest.
fn tournament<R: Rng>(routes: &[Route<'_>], k: usize, rng: &mut R) -> usize {
    let n = routes.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if routes[idx].length() < routes[best_idx].length() {
            best_idx = idx;
        }
    }
    best_idx
}
