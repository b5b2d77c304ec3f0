//! SMA configuration.

use crate::error::{OptimizeError, Result};
use crate::inertia::InertiaDecay;
use crate::optimizer::Direction;
use crate::random::DEFAULT_SEED;
use crate::space::SearchSpace;

/// Initial agent placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionInit {
    /// Uniform inside the bounds.
    #[default]
    Uniform,

    /// Every agent at the origin, clamped into the bounds.
    Zero,
}

/// Configuration for the Slime Mold Algorithm.
///
/// # Examples
///
/// ```
/// use popheur::sma::{PositionInit, SmaConfig};
/// use popheur::InertiaDecay;
///
/// let config = SmaConfig::new(3, -10.0, 10.0)
///     .with_population_size(60)
///     .with_coefficients(1.5, 0.5)
///     .with_position_init(PositionInit::Zero)
///     .with_inertia_decay(InertiaDecay::new(0.9, 0.4));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmaConfig {
    /// Number of agents.
    pub population_size: usize,

    pub dim: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,

    /// Iterations run by `optimize(None)`.
    pub max_iterations: usize,

    pub direction: Direction,

    /// Emit one INFO event per iteration.
    pub verbose: bool,

    pub seed: u64,

    /// Attraction toward the best position.
    pub c1: f64,

    /// Amplitude of the random perturbation.
    pub c2: f64,

    /// Step scaling used when `inertia_decay` is `None`.
    pub w: f64,

    pub position_init: PositionInit,

    /// Linear inertia schedule. Requires runs of at least 2 iterations.
    pub inertia_decay: Option<InertiaDecay>,

    pub record_history: bool,

    /// Evaluate agents in parallel using rayon.
    pub parallel: bool,
}

impl SmaConfig {
    /// Creates a configuration with 50 agents, `c1 = c2 = 1.5`, `w = 0.5`.
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
            c1: 1.5,
            c2: 1.5,
            w: 0.5,
            position_init: PositionInit::Uniform,
            inertia_decay: None,
            record_history: false,
            parallel: false,
        }
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn maximize(self) -> Self {
        self.with_direction(Direction::Maximize)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_coefficients(mut self, c1: f64, c2: f64) -> Self {
        self.c1 = c1;
        self.c2 = c2;
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.w = w;
        self
    }

    pub fn with_position_init(mut self, init: PositionInit) -> Self {
        self.position_init = init;
        self
    }

    pub fn with_inertia_decay(mut self, decay: InertiaDecay) -> Self {
        self.inertia_decay = Some(decay);
        self
    }

    pub fn with_record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn space(&self) -> Result<SearchSpace> {
        SearchSpace::new(self.dim, self.lower_bound, self.upper_bound)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.space()?;
        if self.population_size == 0 {
            return Err(OptimizeError::invalid("population_size must be at least 1"));
        }
        for (name, value) in [("c1", self.c1), ("c2", self.c2), ("w", self.w)] {
            if !value.is_finite() {
                return Err(OptimizeError::invalid(format!("{name} must be finite")));
            }
        }
        if let Some(decay) = &self.inertia_decay {
            decay.validate()?;
            decay.check_budget(self.max_iterations)?;
        }
        Ok(())
    }
}
