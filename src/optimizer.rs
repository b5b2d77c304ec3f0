//! The shared optimizer contract.
//!
//! [`Optimizer`] is implemented by [`GeneticAlgorithm`], [`ParticleSwarm`],
//! and [`SlimeMold`], so callers can swap strategies behind
//! `Box<dyn Optimizer>` without touching the driving code.
//!
//! [`GeneticAlgorithm`]: crate::ga::GeneticAlgorithm
//! [`ParticleSwarm`]: crate::pso::ParticleSwarm
//! [`SlimeMold`]: crate::sma::SlimeMold

use crate::error::Result;
use crate::objective::Objective;
use crate::space::SearchSpace;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Lower fitness is better.
    #[default]
    Minimize,
    /// Higher fitness is better.
    Maximize,
}

impl Direction {
    /// The sentinel every best-tracker starts from.
    pub fn worst(self) -> f64 {
        match self {
            Direction::Minimize => f64::INFINITY,
            Direction::Maximize => f64::NEG_INFINITY,
        }
    }

    /// Strict improvement: ties are never better.
    #[inline]
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Direction::Minimize => candidate < incumbent,
            Direction::Maximize => candidate > incumbent,
        }
    }

    /// Orders two fitness values best first.
    pub fn compare(self, a: f64, b: f64) -> std::cmp::Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal);
        match self {
            Direction::Minimize => ord,
            Direction::Maximize => ord.reverse(),
        }
    }
}

/// Best position and fitness seen over an optimizer's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalBest {
    pub position: Vec<f64>,
    pub fitness: f64,
}

impl GlobalBest {
    /// Creates the sentinel state: zero position, worst fitness.
    pub fn new(dim: usize, direction: Direction) -> Self {
        Self {
            position: vec![0.0; dim],
            fitness: direction.worst(),
        }
    }

    /// Replaces the best if `fitness` strictly improves on it.
    ///
    /// Returns `true` when the candidate was accepted.
    pub fn offer(&mut self, position: &[f64], fitness: f64, direction: Direction) -> bool {
        if direction.is_better(fitness, self.fitness) {
            self.fitness = fitness;
            self.position.clear();
            self.position.extend_from_slice(position);
            true
        } else {
            false
        }
    }

    /// Offers every member of a population in index order.
    pub fn offer_all(
        &mut self,
        positions: &[Vec<f64>],
        fitness: &[f64],
        direction: Direction,
    ) -> bool {
        let mut improved = false;
        for (x, &f) in positions.iter().zip(fitness) {
            improved |= self.offer(x, f, direction);
        }
        improved
    }
}

/// Population snapshots, indexed iteration × member × dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    snapshots: Vec<Vec<Vec<f64>>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a copy of the population.
    pub fn record(&mut self, population: &[Vec<f64>]) {
        self.snapshots.push(population.to_vec());
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Vec<Vec<f64>>] {
        &self.snapshots
    }

    /// The most recent snapshot, if any.
    pub fn last(&self) -> Option<&[Vec<f64>]> {
        self.snapshots.last().map(Vec::as_slice)
    }
}

/// Outcome of a single [`Optimizer::optimize`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Iterations executed by this call.
    pub iterations: usize,

    /// Objective evaluations performed by this call.
    pub evaluations: usize,

    /// Best fitness after the call (over the whole lifetime).
    pub best_fitness: f64,

    /// Position achieving `best_fitness`.
    pub best_solution: Vec<f64>,
}

/// Capability contract shared by every strategy.
///
/// # Usage
///
/// ```
/// use popheur::{Optimizer, ParticleSwarm, PsoConfig};
///
/// let config = PsoConfig::new(2, -5.0, 5.0).with_seed(1);
/// let mut opt: Box<dyn Optimizer> = Box::new(ParticleSwarm::new(config).unwrap());
/// opt.set_objective(Box::new(|x: &[f64]| x.iter().map(|v| v * v).sum::<f64>()));
/// opt.optimize(Some(50)).unwrap();
/// assert!(opt.best_fitness() < 1.0);
/// ```
pub trait Optimizer: Send {
    /// Stores the objective, replacing any previous one.
    fn set_objective(&mut self, objective: Box<dyn Objective>);

    /// Runs `iterations` steps, or the configured budget when `None`.
    ///
    /// Fails with [`OptimizeError::ObjectiveNotSet`] before
    /// [`set_objective`](Self::set_objective). Repeated calls continue from
    /// the current population.
    ///
    /// [`OptimizeError::ObjectiveNotSet`]: crate::OptimizeError::ObjectiveNotSet
    fn optimize(&mut self, iterations: Option<usize>) -> Result<RunSummary>;

    /// Best position found so far (all zeros before the first run).
    fn best_solution(&self) -> &[f64];

    /// Best fitness found so far (the worst sentinel before the first run).
    fn best_fitness(&self) -> f64;

    /// Recorded population snapshots.
    fn population_history(&self) -> &History;

    /// Best fitness after the initial evaluation and after each iteration.
    fn fitness_history(&self) -> &[f64];

    /// Current population positions.
    fn population(&self) -> &[Vec<f64>];

    fn space(&self) -> &SearchSpace;

    fn direction(&self) -> Direction;
}
