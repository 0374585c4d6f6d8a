//! The immutable set of cities and their pairwise distances.
//!
//! A [`CityRegistry`] is built once before any evolutionary activity and is
//! only ever read afterwards. Routes refer to cities by their index into
//! the registry and borrow the registry for length computation.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// A complete n×n distance table over a set of uniquely named cities.
///
/// # Invariants
///
/// - Every ordered pair has a finite, nonnegative distance.
/// - The diagonal is zero.
/// - Names are unique and there is at least one city.
///
/// Symmetry is expected but not required; see [`is_symmetric`](Self::is_symmetric).
#[derive(Debug, Clone, PartialEq)]
pub struct CityRegistry {
    names: Vec<String>,
    /// Row-major, `n * n` entries.
    distances: Vec<f64>,
    index: HashMap<String, usize>,
}

/// Borrowed view of one city: its name and its row of distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City<'a> {
    pub index: usize,
    pub name: &'a str,
    pub distances: &'a [f64],
}

impl City<'_> {
    /// Distance from this city to the city with index `to`.
    pub fn distance_to(&self, to: usize) -> f64 {
        self.distances[to]
    }
}

impl CityRegistry {
    /// Builds a registry from city names and a square distance matrix.
    ///
    /// `matrix[i][j]` is the distance from city `i` to city `j`. Row-level
    /// errors carry the 1-based row number as their `line`.
    pub fn new(names: Vec<String>, matrix: Vec<Vec<f64>>) -> Result<Self> {
        let n = names.len();
        if n == 0 {
            return Err(Error::input(0, "distance table contains no cities"));
        }
        if matrix.len() != n {
            return Err(Error::input(
                0,
                format!("expected {n} rows of distances, found {}", matrix.len()),
            ));
        }

        let mut index = HashMap::with_capacity(n);
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(Error::input(i + 1, format!("duplicate city name '{name}'")));
            }
        }

        let mut distances = Vec::with_capacity(n * n);
        for (i, row) in matrix.into_iter().enumerate() {
            if row.len() != n {
                return Err(Error::input(
                    i + 1,
                    format!("row for '{}' has {} entries, expected {n}", names[i], row.len()),
                ));
            }
            for (j, d) in row.into_iter().enumerate() {
                if !d.is_finite() || d < 0.0 {
                    return Err(Error::input(
                        i + 1,
                        format!("distance {} -> {} must be finite and nonnegative, got {d}", names[i], names[j]),
                    ));
                }
                if i == j && d != 0.0 {
                    return Err(Error::input(
                        i + 1,
                        format!("self-distance of '{}' must be 0, got {d}", names[i]),
                    ));
                }
                distances.push(d);
            }
        }

        Ok(Self {
            names,
            distances,
            index,
        })
    }

    /// Builds a registry of Euclidean distances between named points.
    pub fn from_coordinates<S: Into<String>>(points: impl IntoIterator<Item = (S, f64, f64)>) -> Result<Self> {
        let (names, coords): (Vec<String>, Vec<(f64, f64)>) = points
            .into_iter()
            .map(|(name, x, y)| (name.into(), (x, y)))
            .unzip();

        let matrix = coords
            .iter()
            .map(|&(x1, y1)| {
                coords
                    .iter()
                    .map(|&(x2, y2)| (x1 - x2).hypot(y1 - y2))
                    .collect()
            })
            .collect();

        Self::new(names, matrix)
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false` for a successfully constructed registry.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Distance from city `from` to city `to`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from * self.len() + to]
    }

    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns a view of the city at `index`.
    pub fn city(&self, index: usize) -> City<'_> {
        let n = self.len();
        City {
            index,
            name: &self.names[index],
            distances: &self.distances[index * n..(index + 1) * n],
        }
    }

    pub fn cities(&self) -> impl Iterator<Item = City<'_>> + '_ {
        (0..self.len()).map(move |i| self.city(i))
    }

    /// Whether `distance(a, b)` and `distance(b, a)` differ by at most
    /// `tolerance` for every pair.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.len();
        (0..n).all(|i| ((i + 1)..n).all(|j| (self.distance(i, j) - self.distance(j, i)).abs() <= tolerance))
    }
}
