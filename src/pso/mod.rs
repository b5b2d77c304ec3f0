//! Particle Swarm Optimization.
//!
//! Particles fly through the search space, pulled toward their own best
//! position and toward a social guide: the swarm-wide best, or the best of
//! a ring neighborhood. Velocity clamping and a linearly decaying inertia
//! weight are optional.

mod config;
mod runner;

pub use config::{PsoConfig, Topology, VelocityInit};
pub use runner::ParticleSwarm;
