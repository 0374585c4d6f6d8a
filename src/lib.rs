//! Travelling Salesman Problem solver based on a genetic algorithm.
//!
//! - [`cities`]: the immutable city set and distance table
//! - [`loader`]: reading distance tables from text files
//! - [`ga`]: routes, populations, selection, operators and the
//!   generational evolution loop
//!
//! # Example
//!
//! ```
//! use tsp_evolve::cities::CityRegistry;
//! use tsp_evolve::ga::{EvolutionConfig, EvolutionController};
//!
//! let registry = CityRegistry::from_coordinates([
//!     ("a", 0.0, 0.0),
//!     ("b", 2.0, 0.0),
//!     ("c", 2.0, 2.0),
//!     ("d", 0.0, 2.0),
//!     ("e", 1.0, 1.0),
//! ])
//! .unwrap();
//!
//! let config = EvolutionConfig::default().with_generations(20).with_seed(7);
//! let result = EvolutionController::new(&registry, config)
//!     .unwrap()
//!     .run()
//!     .unwrap();
//! assert!(result.best.validate().is_ok());
//! println!("{} ({:.2})", result.best, result.best_length);
//! ```

pub mod cities;
pub mod error;
pub mod ga;
pub mod loader;

pub use error::{Error, Result};
