//! Objective adapter.
//!
//! The optimizers treat the objective as a black box: they call it with a
//! position and compare the returned values, nothing more.

use crate::error::{OptimizeError, Result};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A real-valued objective over `&[f64]`.
///
/// Implemented for every `Fn(&[f64]) -> f64 + Send + Sync` closure, so most
/// callers never implement it by hand.
///
/// # Panics
///
/// A panic inside `evaluate` propagates out of `optimize` unchanged and
/// leaves the population as of the last completed step.
pub trait Objective: Send + Sync {
    /// Evaluates the objective at `x`.
    fn evaluate(&self, x: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, x: &[f64]) -> f64 {
        self(x)
    }
}

/// Evaluates every member of `population`, returning fitness in order.
///
/// With `parallel` set (and the `parallel` feature enabled) the calls are
/// spread over the rayon pool; the result vector is still in population
/// order, so downstream best tracking does not depend on scheduling.
///
/// Fails with [`OptimizeError::NonFiniteFitness`] for the lowest-indexed
/// member whose value is NaN or infinite.
pub(crate) fn evaluate_batch(
    objective: &dyn Objective,
    population: &[Vec<f64>],
    parallel: bool,
) -> Result<Vec<f64>> {
    let fitness: Vec<f64> = if parallel {
        evaluate_parallel(objective, population)
    } else {
        population.iter().map(|x| objective.evaluate(x)).collect()
    };

    if let Some((member, &value)) = fitness.iter().enumerate().find(|(_, f)| !f.is_finite()) {
        return Err(OptimizeError::NonFiniteFitness { value, member });
    }
    Ok(fitness)
}

#[cfg(feature = "parallel")]
fn evaluate_parallel(objective: &dyn Objective, population: &[Vec<f64>]) -> Vec<f64> {
    population
        .par_iter()
        .map(|x| objective.evaluate(x))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel(objective: &dyn Objective, population: &[Vec<f64>]) -> Vec<f64> {
    population.iter().map(|x| objective.evaluate(x)).collect()
}
