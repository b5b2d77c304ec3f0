//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::{Crossover, Mutation};
use crate::error::{OptimizeError, Result};
use crate::optimizer::Direction;
use crate::random::DEFAULT_SEED;
use crate::space::SearchSpace;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use popheur::ga::GaConfig;
///
/// let config = GaConfig::new(2, -5.0, 5.0);
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.tournament_size, 2);
/// assert_eq!(config.elitism_count, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use popheur::ga::{Crossover, GaConfig, Mutation};
///
/// let config = GaConfig::new(10, 0.0, 1.0)
///     .with_population_size(200)
///     .with_tournament_size(4)
///     .with_elitism_count(5)
///     .with_crossover(Crossover::SinglePoint)
///     .with_mutation(Mutation::Gaussian)
///     .with_mutation_std(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Genes per individual.
    pub dim: usize,

    pub lower_bound: f64,
    pub upper_bound: f64,

    /// Generations run by `optimize(None)`.
    pub max_iterations: usize,

    pub direction: Direction,

    /// Emit one INFO event per generation.
    pub verbose: bool,

    /// Random seed for reproducibility.
    pub seed: u64,

    /// For uniform crossover: probability that a gene comes from the first
    /// parent (0.0–1.0). Ignored by single-point crossover.
    pub crossover_rate: f64,

    /// Per-gene mutation probability (0.0–1.0).
    pub mutation_rate: f64,

    /// Tournament size `k` (at least 1).
    ///
    /// - k=1: uniform random selection
    /// - k=2-3: light to moderate pressure
    pub tournament_size: usize,

    /// Individuals copied unchanged into the next generation.
    ///
    /// Must be smaller than `population_size`.
    pub elitism_count: usize,

    pub crossover: Crossover,

    pub mutation: Mutation,

    /// Standard deviation for [`Mutation::Gaussian`].
    ///
    /// `None` (or a non-positive value) means 10% of the bound range.
    pub mutation_std: Option<f64>,

    /// Record a population snapshot after every generation instead of only
    /// at the end of each `optimize` call.
    pub record_history: bool,

    /// Evaluate individuals in parallel using rayon.
    pub parallel: bool,
}

impl GaConfig {
    /// Creates a configuration for a `dim`-dimensional box with defaults for
    /// everything else.
    pub fn new(dim: usize, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            population_size: 50,
            dim,
            lower_bound,
            upper_bound,
            max_iterations: 100,
            direction: Direction::Minimize,
            verbose: false,
            seed: DEFAULT_SEED,
            crossover_rate: 0.7,
            mutation_rate: 0.01,
            tournament_size: 2,
            elitism_count: 1,
            crossover: Crossover::Uniform,
            mutation: Mutation::Reset,
            mutation_std: None,
            record_history: false,
            parallel: false,
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the default number of generations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Shorthand for `with_direction(Direction::Maximize)`.
    pub fn maximize(self) -> Self {
        self.with_direction(Direction::Maximize)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn with_mutation_std(mut self, std: f64) -> Self {
        self.mutation_std = Some(std);
        self
    }

    pub fn with_record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The search space described by `dim` and the bounds.
    pub fn space(&self) -> Result<SearchSpace> {
        SearchSpace::new(self.dim, self.lower_bound, self.upper_bound)
    }

    /// Gaussian mutation standard deviation after applying the default.
    pub fn effective_mutation_std(&self) -> f64 {
        match self.mutation_std {
            Some(std) if std > 0.0 => std,
            _ => (self.upper_bound - self.lower_bound) * 0.1,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.space()?;
        if self.population_size == 0 {
            return Err(OptimizeError::invalid("population_size must be at least 1"));
        }
        if self.tournament_size < 1 {
            return Err(OptimizeError::invalid("tournament_size must be at least 1"));
        }
        if self.elitism_count >= self.population_size {
            return Err(OptimizeError::invalid(format!(
                "elitism_count ({}) must be < population_size ({})",
                self.elitism_count, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(OptimizeError::invalid("crossover_rate must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(OptimizeError::invalid("mutation_rate must be in [0, 1]"));
        }
        if let Some(std) = self.mutation_std {
            if !std.is_finite() {
                return Err(OptimizeError::invalid("mutation_std must be finite"));
            }
        }
        Ok(())
    }
}
