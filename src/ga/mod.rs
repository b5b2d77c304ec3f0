//! Genetic Algorithm over real-valued vectors.
//!
//! Individuals are gene vectors inside a [`SearchSpace`](crate::SearchSpace).
//! Each generation runs tournament selection, crossover, per-gene mutation,
//! bounding and elitism.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, operators)
//! - [`GeneticAlgorithm`]: Owns the population and runs generations
//!
//! # Submodules
//!
//! - [`operators`]: Uniform/single-point crossover, Gaussian/reset mutation
//! - [`selection`]: Tournament selection and fitness ranking
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod operators;
mod runner;
pub mod selection;

pub use config::GaConfig;
pub use operators::{Crossover, Mutation};
pub use runner::GeneticAlgorithm;
