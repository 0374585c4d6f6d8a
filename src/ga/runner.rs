//! Generational evolution loop.
//!
//! [`EvolutionController`] drives the state machine
//! `Initializing → (Breeding → Mutating → Evaluating)* → Terminated`:
//!
//! 1. **Initializing**: a random population is created; its fittest length
//!    becomes the initial length, and the best-ever route starts out as an
//!    independent random route.
//! 2. **Breeding**: the previous fittest route is carried into slot 0
//!    (elitism); every other slot is the OX child of two tournament winners.
//! 3. **Mutating**: every slot, the elite included, is mutated with
//!    probability `mutation_rate`. Elitism guarantees survival into the
//!    candidate pool, not immunity from mutation.
//! 4. **Evaluating**: the new fittest is computed and copied into the
//!    best-ever route when strictly shorter.
//!
//! The loop stops after `generations` populations (the initial one
//! included), or at a generation boundary once the cancellation flag is set.
//!
//! # Random streams
//!
//! For each breeding and mutating phase, one seed per slot is drawn from the
//! caller's random source and every slot then uses its own [`StdRng`].
//! Slots never share a stream, so parallel runs reproduce sequential ones.

use super::config::EvolutionConfig;
use super::operators::order_crossover;
use super::population::Population;
use super::report::{GenerationObserver, GenerationReport, NoopObserver};
use super::route::Route;
use super::selection::Tournament;
use crate::cities::CityRegistry;
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, trace, warn};

/// Stage of the generational state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Breeding,
    Mutating,
    Evaluating,
    Terminated,
}

/// Live state of a run between generations.
#[derive(Debug, Clone)]
pub struct EvolutionState<'a> {
    population: Population<'a>,
    best_ever: Route<'a>,
    initial_length: f64,
    generation: usize,
    total_generations: usize,
    phase: Phase,
    history: Vec<f64>,
    best_history: Vec<f64>,
}

impl<'a> EvolutionState<'a> {
    /// The current generation.
    pub fn population(&self) -> &Population<'a> {
        &self.population
    }

    /// Owned copy of the shortest route seen so far.
    pub fn best_ever(&self) -> &Route<'a> {
        &self.best_ever
    }

    /// Fittest length of the initial random population.
    pub fn initial_length(&self) -> f64 {
        self.initial_length
    }

    /// Index of the current population; the initial one is 0.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    /// Fittest length of every population so far.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Best-ever length after every population so far.
    pub fn best_history(&self) -> &[f64] {
        &self.best_history
    }

    pub fn report(&self) -> GenerationReport<'_, 'a> {
        GenerationReport {
            generation: self.generation,
            total_generations: self.total_generations,
            fittest: self.population.fittest(),
            best_ever_length: self.best_ever.length(),
        }
    }

    fn enter(&mut self, phase: Phase) {
        trace!(generation = self.generation, from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }

    fn into_result(self, cancelled: bool) -> EvolutionResult<'a> {
        EvolutionResult {
            best_length: self.best_ever.length(),
            best: self.best_ever,
            initial_length: self.initial_length,
            generations: self.generation + 1,
            cancelled,
            history: self.history,
            best_history: self.best_history,
        }
    }
}

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<'a> {
    /// The best route found during the entire run.
    pub best: Route<'a>,

    /// Same as `best.length()`.
    pub best_length: f64,

    /// Fittest length of the initial random population.
    pub initial_length: f64,

    /// Number of populations evaluated, the initial one included.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Fittest length of every generation, starting with the initial one.
    pub history: Vec<f64>,

    /// Best-ever length after every generation. Non-increasing.
    pub best_history: Vec<f64>,
}

impl EvolutionResult<'_> {
    /// `initial_length - best_length`; negative when no generation beat the
    /// initial fittest.
    pub fn improvement(&self) -> f64 {
        self.initial_length - self.best_length
    }
}

/// Runs the genetic algorithm over a fixed [`CityRegistry`].
///
/// # Usage
///
/// ```
/// use tsp_evolve::cities::CityRegistry;
/// use tsp_evolve::ga::{EvolutionConfig, EvolutionController};
///
/// let registry = CityRegistry::from_coordinates([
///     ("a", 0.0, 0.0),
///     ("b", 1.0, 0.0),
///     ("c", 1.0, 1.0),
///     ("d", 0.0, 1.0),
/// ])
/// .unwrap();
/// let config = EvolutionConfig::default()
///     .with_population_size(20)
///     .with_generations(30)
///     .with_seed(42);
///
/// let controller = EvolutionController::new(&registry, config).unwrap();
/// let result = controller.run().unwrap();
/// assert!((result.best_length - 4.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionController<'a> {
    registry: &'a CityRegistry,
    config: EvolutionConfig,
    tournament: Tournament,
}

impl<'a> EvolutionController<'a> {
    /// Validates `config` and binds it to `registry`.
    pub fn new(registry: &'a CityRegistry, config: EvolutionConfig) -> Result<Self> {
        config.validate()?;
        if registry.is_empty() {
            return Err(Error::config("registry must contain at least one city"));
        }
        if config.parallel && !cfg!(feature = "parallel") {
            warn!("parallel breeding requested but the `parallel` feature is disabled; running sequentially");
        }
        if config.mutation == super::operators::MutationPolicy::TwoOpt && !registry.is_symmetric(1e-9) {
            warn!("2-opt gains assume symmetric distances; the distance table is asymmetric");
        }
        let tournament = Tournament::new(config.tournament_size)?;
        Ok(Self {
            registry,
            config,
            tournament,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn registry(&self) -> &'a CityRegistry {
        self.registry
    }

    /// Runs to completion with the configured seed, or a fresh one.
    pub fn run(&self) -> Result<EvolutionResult<'a>> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        self.run_with_rng(&mut rng)
    }

    /// Runs to completion drawing every random decision from `rng`.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> Result<EvolutionResult<'a>> {
        self.run_with(rng, None, &mut NoopObserver)
    }

    /// Runs with an optional cancellation flag and a progress observer.
    ///
    /// The flag is only checked between generations. The observer is called
    /// once per evolved generation (not for the initial population).
    #[instrument(level = "info", skip_all, fields(
        cities = self.registry.len(),
        population = self.config.population_size,
        generations = self.config.generations,
    ))]
    pub fn run_with<R: Rng, O: GenerationObserver + ?Sized>(
        &self,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
        observer: &mut O,
    ) -> Result<EvolutionResult<'a>> {
        let mut state = self.initialize(rng)?;
        info!(initial_length = state.initial_length, "initial population created");

        let mut cancelled = false;
        while !state.is_terminated() {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    state.enter(Phase::Terminated);
                    break;
                }
            }

            self.step(&mut state, rng)?;
            debug!(
                generation = state.generation,
                fittest = state.population.fittest().length(),
                best_ever = state.best_ever.length(),
                "generation evaluated"
            );
            observer.on_generation(&state.report());
        }

        let result = state.into_result(cancelled);
        info!(
            initial_length = result.initial_length,
            best_length = result.best_length,
            improvement = result.improvement(),
            generations = result.generations,
            cancelled = result.cancelled,
            "evolution finished"
        );
        Ok(result)
    }

    /// Initializing: random population, initial length, random best-ever.
    pub fn initialize<R: Rng>(&self, rng: &mut R) -> Result<EvolutionState<'a>> {
        let population = Population::random(self.registry, self.config.population_size, rng)?;
        let initial_length = population.fittest().length();
        let best_ever = Route::random(self.registry, rng);

        let mut state = EvolutionState {
            history: vec![initial_length],
            best_history: vec![best_ever.length()],
            population,
            best_ever,
            initial_length,
            generation: 0,
            total_generations: self.config.generations,
            phase: Phase::Initializing,
        };
        if self.config.generations <= 1 {
            state.enter(Phase::Terminated);
        }
        Ok(state)
    }

    /// One Breeding → Mutating → Evaluating cycle.
    ///
    /// Does nothing on a terminated state.
    pub fn step<R: Rng>(&self, state: &mut EvolutionState<'a>, rng: &mut R) -> Result<()> {
        if state.is_terminated() {
            return Ok(());
        }

        state.enter(Phase::Breeding);
        let mut candidates = self.breed(&state.population, rng);

        state.enter(Phase::Mutating);
        self.mutate_candidates(&mut candidates, rng);

        self.evaluate(state, candidates)?;

        if state.generation + 1 >= self.config.generations {
            state.enter(Phase::Terminated);
        }
        Ok(())
    }

    /// Breeding: builds the next candidate pool from `current`.
    ///
    /// With elitism, slot 0 holds a copy of `current`'s fittest route;
    /// every other slot is the OX child of two tournament winners.
    pub fn breed<R: Rng>(&self, current: &Population<'a>, rng: &mut R) -> Vec<Route<'a>> {
        let size = self.config.population_size;
        let elites = self.config.elitism.min(size);

        let seeds: Vec<u64> = (elites..size).map(|_| rng.random()).collect();
        let children = self.map_slots(&seeds, |slot_rng| {
            let parent1 = self.tournament.select(current, slot_rng);
            let parent2 = self.tournament.select(current, slot_rng);
            order_crossover(parent1, parent2, slot_rng)
        });

        let mut candidates = Vec::with_capacity(size);
        if elites > 0 {
            candidates.push(current.fittest().clone());
        }
        candidates.extend(children);
        candidates
    }

    /// Mutating: each candidate, slot 0 included, is handed to the mutation
    /// operator with probability `mutation_rate`.
    pub fn mutate_candidates<R: Rng>(&self, candidates: &mut [Route<'a>], rng: &mut R) {
        let seeds: Vec<u64> = candidates.iter().map(|_| rng.random()).collect();
        let mutation_rate = self.config.mutation_rate;
        let operator_rate = self.config.operator_rate;
        let policy = self.config.mutation;

        self.for_each_slot(candidates, &seeds, |route, slot_rng| {
            if slot_rng.random_range(0.0..1.0) < mutation_rate {
                policy.mutate(route, operator_rate, slot_rng);
            }
        });
    }

    /// Evaluating: installs `candidates` as the new generation and updates
    /// the best-ever route with a value copy when strictly shorter.
    pub fn evaluate(&self, state: &mut EvolutionState<'a>, candidates: Vec<Route<'a>>) -> Result<()> {
        state.enter(Phase::Evaluating);
        let population = Population::from_routes(candidates)?;

        let fittest = population.fittest();
        if fittest.length() < state.best_ever.length() {
            state.best_ever = fittest.clone();
        }
        state.history.push(fittest.length());
        state.best_history.push(state.best_ever.length());

        state.population = population;
        state.generation += 1;
        Ok(())
    }

    fn map_slots<T, F>(&self, seeds: &[u64], f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&mut StdRng) -> T + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                use rayon::prelude::*;
                return seeds
                    .par_iter()
                    .map(|&seed| f(&mut StdRng::seed_from_u64(seed)))
                    .collect();
            }
        }
        seeds
            .iter()
            .map(|&seed| f(&mut StdRng::seed_from_u64(seed)))
            .collect()
    }

    fn for_each_slot<F>(&self, candidates: &mut [Route<'a>], seeds: &[u64], f: F)
    where
        F: Fn(&mut Route<'a>, &mut StdRng) + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                use rayon::prelude::*;
                candidates
                    .par_iter_mut()
                    .zip(seeds.par_iter())
                    .for_each(|(route, &seed)| f(route, &mut StdRng::seed_from_u64(seed)));
                return;
            }
        }
        for (route, &seed) in candidates.iter_mut().zip(seeds) {
            f(route, &mut StdRng::seed_from_u64(seed));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
