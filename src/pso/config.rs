//! PSO configuration, swarm topology and velocity initialization.

use crate::error::{OptimizeError, Result};
use crate::inertia::InertiaDecay;
use crate::optimizer::Direction;
use crate::random::DEFAULT_SEED;
use crate::space::SearchSpace;

/// Swarm topology: which personal bests steer a particle's social term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Every particle follows the swarm-wide best.
    #[default]
    Global,

    /// Particle `i` follows the best personal best among indices
    /// `i - neighbors ..= i + neighbors`, wrapping around the swarm.
    Ring {
        /// Neighbors on each side (at least 1).
        neighbors: usize,
    },
}

/// Initial particle velocities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VelocityInit {
    /// All velocities start at zero.
    Zero,

    /// Uniform in `±10%` of the bound range per component.
    #[default]
    Random,
}

/// Configuration for Particle Swarm Optimization.
///
/// # Examples
///
/// ```
/// use popheur::pso::{PsoConfig, Topology};
/// use popheur::InertiaDecay;
///
/// let config = PsoConfig::new(5, -10.0, 10.0)
///     .with_population_size(40)
///     .with_coefficients(2.0, 2.0)
///     .with_v_max(1.0)
///     .with_ring_topology(2)
///     .with_inertia_decay(InertiaDecay::new(0.9, 0.4));
/// assert_eq!(config.topology, Topology::Ring { neighbors: 2 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles.
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

    /// Cognitive coefficient (pull toward the personal best).
    pub c1: f64,

    /// Social coefficient (pull toward the global or neighborhood best).
    pub c2: f64,

    /// Inertia weight used when `inertia_decay` is `None`.
    pub w: f64,

    /// Velocity clamp per component; `0.0` disables clamping.
    pub v_max: f64,

    pub velocity_init: VelocityInit,

    pub topology: Topology,

    /// Linear inertia schedule. Requires runs of at least 2 iterations.
    pub inertia_decay: Option<InertiaDecay>,

    /// Record a snapshot after every iteration instead of once per run.
    pub record_history: bool,

    /// Evaluate particles in parallel using rayon.
    pub parallel: bool,
}

impl PsoConfig {
    /// Creates a configuration with default coefficients
    /// (`c1 = c2 = 1.5`, `w = 0.7`) and 30 particles.
    pub fn new(dim: usize, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            population_size: 30,
            dim,
            lower_bound,
            upper_bound,
            max_iterations: 100,
            direction: Direction::Minimize,
            verbose: false,
            seed: DEFAULT_SEED,
            c1: 1.5,
            c2: 1.5,
            w: 0.7,
            v_max: 0.0,
            velocity_init: VelocityInit::Random,
            topology: Topology::Global,
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

    /// Sets the cognitive and social coefficients.
    pub fn with_coefficients(mut self, c1: f64, c2: f64) -> Self {
        self.c1 = c1;
        self.c2 = c2;
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.w = w;
        self
    }

    pub fn with_v_max(mut self, v_max: f64) -> Self {
        self.v_max = v_max;
        self
    }

    pub fn with_velocity_init(mut self, init: VelocityInit) -> Self {
        self.velocity_init = init;
        self
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Shorthand for `with_topology(Topology::Ring { neighbors })`.
    pub fn with_ring_topology(self, neighbors: usize) -> Self {
        self.with_topology(Topology::Ring { neighbors })
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
        if !self.v_max.is_finite() || self.v_max < 0.0 {
            return Err(OptimizeError::invalid("v_max must be finite and non-negative"));
        }
        if let Topology::Ring { neighbors: 0 } = self.topology {
            return Err(OptimizeError::invalid("ring topology needs at least 1 neighbor"));
        }
        if let Some(decay) = &self.inertia_decay {
            decay.validate()?;
            decay.check_budget(self.max_iterations)?;
        }
        Ok(())
    }
}
