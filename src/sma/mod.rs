//! Slime Mold Algorithm.
//!
//! Agents are drawn toward the best position found so far while a uniform
//! perturbation keeps them exploring. The step is scaled by an inertia
//! weight that may decay linearly over a run.

mod config;
mod runner;

pub use config::{PositionInit, SmaConfig};
pub use runner::SlimeMold;
