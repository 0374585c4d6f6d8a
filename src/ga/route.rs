//! Tour representation.

use crate::cities::CityRegistry;
use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// One closed tour visiting every city of a [`CityRegistry`] exactly once.
///
/// The route stores city indices in visiting order together with a cached
/// cyclic tour length. Lower length means fitter.
///
/// Every method that reorders cities recomputes the cached length before
/// returning, so [`length`](Self::length) is never stale.
#[derive(Debug, Clone)]
pub struct Route<'a> {
    registry: &'a CityRegistry,
    order: Vec<usize>,
    length: f64,
}

impl<'a> Route<'a> {
    /// Creates a uniformly random tour.
    pub fn random<R: Rng>(registry: &'a CityRegistry, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..registry.len()).collect();
        order.shuffle(rng);
        Self::from_order_unchecked(registry, order)
    }

    /// Creates a tour from an explicit visiting order.
    ///
    /// Fails with [`Error::InvariantViolation`] if `order` is not a
    /// permutation of the registry's cities.
    pub fn from_order(registry: &'a CityRegistry, order: Vec<usize>) -> Result<Self> {
        let mut route = Self {
            registry,
            order,
            length: 0.0,
        };
        // Validate first: an unknown index would panic in the length sum.
        route.validate()?;
        route.recompute_length();
        Ok(route)
    }

    pub(crate) fn from_order_unchecked(registry: &'a CityRegistry, order: Vec<usize>) -> Self {
        let mut route = Self {
            registry,
            order,
            length: 0.0,
        };
        route.recompute_length();
        route
    }

    pub fn registry(&self) -> &'a CityRegistry {
        self.registry
    }

    /// City indices in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Cached total cyclic length.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Recomputes the cached length: the sum of `distance(order[i], order[(i + 1) % n])`.
    pub fn recompute_length(&mut self) {
        self.length = tour_length(self.registry, &self.order);
    }

    /// Checks that the route contains every registry city exactly once.
    pub fn validate(&self) -> Result<()> {
        let n = self.registry.len();
        if self.order.len() != n {
            return Err(Error::InvariantViolation(format!(
                "route visits {} cities, registry has {n}",
                self.order.len()
            )));
        }
        let mut seen = vec![false; n];
        for &city in &self.order {
            if city >= n {
                return Err(Error::InvariantViolation(format!("unknown city index {city}")));
            }
            if std::mem::replace(&mut seen[city], true) {
                return Err(Error::InvariantViolation(format!(
                    "city '{}' visited more than once",
                    self.registry.name(city)
                )));
            }
        }
        Ok(())
    }

    /// Swaps the cities at positions `i` and `j`.
    pub fn swap_cities(&mut self, i: usize, j: usize) {
        self.order.swap(i, j);
        self.recompute_length();
    }

    /// Reverses the cities at positions `start..=end`.
    pub fn reverse_segment(&mut self, start: usize, end: usize) {
        self.order[start..=end].reverse();
        self.recompute_length();
    }

    /// City names in visiting order.
    pub fn city_names(&self) -> Vec<&'a str> {
        self.order.iter().map(|&c| self.registry.name(c)).collect()
    }

    /// Panics unless the route is a permutation of the registry.
    ///
    /// Operators call this after every change so a broken tour fails at
    /// the operator that produced it.
    pub(crate) fn assert_permutation(&self, operator: &str) {
        if let Err(err) = self.validate() {
            panic!("{operator} broke the permutation: {err}");
        }
    }
}

impl PartialEq for Route<'_> {
    /// Two routes are equal when they visit the same cities in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl fmt::Display for Route<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.city_names().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// Cyclic length of `order` over `registry`.
pub(crate) fn tour_length(registry: &CityRegistry, order: &[usize]) -> f64 {
    let n = order.len();
    (0..n)
        .map(|i| registry.distance(order[i], order[(i + 1) % n]))
        .sum()
}
