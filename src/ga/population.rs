//! Fixed-size collections of routes.

use super::route::Route;
use crate::cities::CityRegistry;
use crate::error::{Error, Result};
use rand::Rng;

/// A non-empty generation of routes with its fittest member cached.
///
/// # Tie-break
///
/// When several routes share the minimum length, the one at the lowest
/// index is the fittest.
#[derive(Debug, Clone)]
pub struct Population<'a> {
    routes: Vec<Route<'a>>,
    fittest: usize,
}

impl<'a> Population<'a> {
    /// Creates `size` independent random routes.
    pub fn random<R: Rng>(registry: &'a CityRegistry, size: usize, rng: &mut R) -> Result<Self> {
        let routes = (0..size).map(|_| Route::random(registry, rng)).collect();
        Self::from_routes(routes)
    }

    /// Wraps already-built routes (carried-over elites and bred children).
    pub fn from_routes(routes: Vec<Route<'a>>) -> Result<Self> {
        let fittest = fittest_index(&routes)
            .ok_or_else(|| Error::config("population must contain at least one route"))?;
        Ok(Self { routes, fittest })
    }

    /// The member with minimum length.
    pub fn fittest(&self) -> &Route<'a> {
        &self.routes[self.fittest]
    }

    pub fn fittest_index(&self) -> usize {
        self.fittest
    }

    pub fn routes(&self) -> &[Route<'a>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always `false`; populations are never empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Index of the shortest route, first one winning ties.
pub(crate) fn fittest_index(routes: &[Route<'_>]) -> Option<usize> {
    let mut iter = routes.iter().enumerate();
    let (mut best, first) = iter.next()?;
    let mut best_len = first.length();
    for (i, route) in iter {
        if route.length() < best_len {
            best = i;
            best_len = route.length();
        }
    }
    Some(best)
}
