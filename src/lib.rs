//! Population-based metaheuristics for box-bounded continuous optimization.
//!
//! Provides three black-box optimizers behind one [`Optimizer`] contract:
//!
//! - **Genetic Algorithm (GA)**: tournament selection, uniform or
//!   single-point crossover, Gaussian or reset mutation, elitism.
//! - **Particle Swarm Optimization (PSO)**: inertia/cognitive/social
//!   velocity update with optional ring topology, velocity clamping and
//!   inertia decay.
//! - **Slime Mold Algorithm (SMA)**: attraction toward the best position
//!   plus uniform perturbation, with optional inertia decay.
//!
//! The objective is any `Fn(&[f64]) -> f64 + Send + Sync`. Every optimizer
//! owns a seeded generator, so identical configurations replay identical
//! searches.
//!
//! # Example
//!
//! ```
//! use popheur::{Optimizer, SlimeMold, SmaConfig};
//!
//! let mut sma = SlimeMold::new(SmaConfig::new(2, -10.0, 10.0).with_seed(1)).unwrap();
//! sma.set_objective(Box::new(|x: &[f64]| x.iter().map(|v| v * v).sum::<f64>()));
//! let summary = sma.optimize(Some(100)).unwrap();
//! assert_eq!(summary.best_solution.len(), 2);
//! assert!(sma.space().contains(sma.best_solution()));
//! ```
//!
//! # Logging
//!
//! Optimizers emit [`tracing`] events: DEBUG on construction and at the
//! start and end of each run, and one INFO event per iteration when the
//! configuration's `verbose` flag is set. Install a subscriber to see them.

mod error;
pub mod ga;
mod inertia;
mod objective;
mod optimizer;
pub mod pso;
pub mod random;
pub mod sma;
mod space;

pub use error::{OptimizeError, Result};
pub use ga::{GaConfig, GeneticAlgorithm};
pub use inertia::InertiaDecay;
pub use objective::Objective;
pub use optimizer::{Direction, GlobalBest, History, Optimizer, RunSummary};
pub use pso::{ParticleSwarm, PsoConfig};
pub use sma::{SlimeMold, SmaConfig};
pub use space::SearchSpace;
