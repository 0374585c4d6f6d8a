//! Genetic algorithm for the Travelling Salesman Problem.
//!
//! Routes are permutations of the cities in a [`CityRegistry`](crate::cities::CityRegistry);
//! fitness is the cyclic tour length (shorter is fitter).
//!
//! # Key Types
//!
//! - [`Route`]: one closed tour with a cached length
//! - [`Population`]: a generation of routes with its fittest member
//! - [`Tournament`]: tournament parent selection
//! - [`EvolutionConfig`]: run parameters
//! - [`EvolutionController`]: executes the generational loop
//! - [`EvolutionResult`]: best-ever route and run statistics
//!
//! # Submodules
//!
//! - [`operators`]: order crossover, swap and 2-opt mutation
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
pub mod operators;
mod population;
mod report;
mod route;
mod runner;
mod selection;

pub use config::EvolutionConfig;
pub use operators::MutationPolicy;
pub use population::Population;
pub use report::{GenerationObserver, GenerationReport, NoopObserver};
pub use route::Route;
pub use runner::{EvolutionController, EvolutionResult, EvolutionState, Phase};
pub use selection::Tournament;
