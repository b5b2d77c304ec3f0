//! Tournament selection.
//!
//! Selection builds a mating pool the same size as the population by
//! running one tournament per slot.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::optimizer::Direction;
use rand::Rng;

/// Tournament selection: draw `k` indices with replacement, return the best.
///
/// The first drawn index wins ties.
///
/// # Panics
/// Panics if `fitness` is empty.
pub fn tournament<R: Rng>(fitness: &[f64], k: usize, direction: Direction, rng: &mut R) -> usize {
    assert!(!fitness.is_empty(), "cannot select from empty population");
    let k = k.max(1);
    let n = fitness.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if direction.is_better(fitness[idx], fitness[best_idx]) {
            best_idx = idx;
        }
    }
    best_idx
}

/// Builds a mating pool of `population.len()` tournament winners.
pub fn tournament_pool<R: Rng>(
    population: &[Vec<f64>],
    fitness: &[f64],
    k: usize,
    direction: Direction,
    rng: &mut R,
) -> Vec<Vec<f64>> {
    debug_assert_eq!(population.len(), fitness.len());
    (0..population.len())
        .map(|_| population[tournament(fitness, k, direction, rng)].clone())
        .collect()
}

/// Population indices ordered best first; ties keep index order.
pub fn rank(fitness: &[f64], direction: Direction) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..fitness.len()).collect();
    indices.sort_by(|&a, &b| direction.compare(fitness[a], fitness[b]));
    indices
}
