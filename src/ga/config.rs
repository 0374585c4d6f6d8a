//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds all parameters that control the generational loop.

use super::operators::MutationPolicy;
use crate::error::{Error, Result};

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use tsp_evolve::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.tournament_size, 7);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_evolve::ga::{EvolutionConfig, MutationPolicy};
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_tournament_size(5)
///     .with_mutation_rate(0.2)
///     .with_mutation(MutationPolicy::TwoOpt)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Mutation probabilities
///
/// Two probabilities gate mutation. `mutation_rate` decides, per route and
/// per generation, whether the mutation operator is invoked at all.
/// `operator_rate` is the probability the operator then actually changes
/// the route. The effective per-route rate is their product; the default
/// `operator_rate` of 1.0 leaves `mutation_rate` as the single knob.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvolutionConfig {
    /// Number of routes per generation.
    pub population_size: usize,

    /// Total number of generations, the random initial one included.
    pub generations: usize,

    /// Draws per tournament. Higher means greedier selection.
    pub tournament_size: usize,

    /// Routes carried over unchanged into the next candidate pool (0 or 1).
    pub elitism: usize,

    /// Per-route probability that mutation is invoked each generation.
    pub mutation_rate: f64,

    /// Probability that an invoked mutation operator changes the route.
    pub operator_rate: f64,

    /// Which mutation operator to use.
    pub mutation: MutationPolicy,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Breed and mutate the slots of a generation in parallel.
    ///
    /// Requires the `parallel` feature; ignored otherwise. Results are
    /// identical to sequential runs with the same seed.
    pub parallel: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            tournament_size: 7,
            elitism: 1,
            mutation_rate: 0.3,
            operator_rate: 1.0,
            mutation: MutationPolicy::Swap,
            seed: None,
            parallel: false,
        }
    }
}

impl EvolutionConfig {
    /// Parameters of the classic European-cities run: 2000 routes, 100
    /// generations, tournaments of 7, and both mutation gates active
    /// (0.3 in the loop, 0.6 inside the operator).
    pub fn classic() -> Self {
        Self {
            population_size: 2000,
            generations: 100,
            tournament_size: 7,
            mutation_rate: 0.3,
            operator_rate: 0.6,
            ..Self::default()
        }
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_elitism(mut self, n: usize) -> Self {
        self.elitism = n;
        self
    }

    /// Sets the per-route mutation trigger probability.
    ///
    /// Not clamped: out-of-range values are reported by [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_operator_rate(mut self, rate: f64) -> Self {
        self.operator_rate = rate;
        self
    }

    pub fn with_mutation(mut self, policy: MutationPolicy) -> Self {
        self.mutation = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`Error::InvalidConfiguration`] describing the first
    /// offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.tournament_size < 1 {
            return Err(Error::config("tournament_size must be at least 1"));
        }
        if self.population_size < self.tournament_size {
            return Err(Error::config(format!(
                "population_size ({}) must be at least tournament_size ({})",
                self.population_size, self.tournament_size
            )));
        }
        if self.generations < 1 {
            return Err(Error::config("generations must be at least 1"));
        }
        if self.elitism > 1 {
            return Err(Error::config("elitism must be 0 or 1"));
        }
        check_probability("mutation_rate", self.mutation_rate)?;
        check_probability("operator_rate", self.operator_rate)?;
        Ok(())
    }
}

fn check_probability(name: &str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(Error::config(format!("{name} must be within [0, 1], got {p}")))
    }
}
