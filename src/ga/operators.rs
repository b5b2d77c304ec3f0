//! Real-coded crossover and mutation operators.
//!
//! Every operator takes its inputs by reference (or by value for the gene
//! vector being mutated) and returns a new child, so each step of a
//! generation can be inspected on its own.
//!
//! # Crossover Operators
//!
//! - [`uniform_crossover`]: per-gene coin flip between the two parents
//! - [`single_point_crossover`]: prefix from one parent, suffix from the other
//!
//! # Mutation Operators
//!
//! - [`gaussian_mutation`]: additive normal noise
//! - [`reset_mutation`]: resample uniformly inside the bounds
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Back, Fogel & Michalewicz (1997), *Handbook of Evolutionary Computation*

use crate::space::SearchSpace;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Crossover operator used to build offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Each gene comes from the first parent with probability
    /// `crossover_rate`, otherwise from the second.
    #[default]
    Uniform,

    /// One cut point in `[1, dim - 1]`; genes before it come from the first
    /// parent, the rest from the second.
    SinglePoint,
}

impl Crossover {
    /// Applies this operator to two parents.
    pub fn apply<R: Rng>(self, parent1: &[f64], parent2: &[f64], rate: f64, rng: &mut R) -> Vec<f64> {
        match self {
            Crossover::Uniform => uniform_crossover(parent1, parent2, rate, rng),
            Crossover::SinglePoint => single_point_crossover(parent1, parent2, rng),
        }
    }
}

/// Mutation operator applied gene by gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// Replace the gene with a uniform draw from the bounds.
    #[default]
    Reset,

    /// Add zero-mean Gaussian noise.
    Gaussian,
}

/// Uniform crossover.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<R: Rng>(parent1: &[f64], parent2: &[f64], rate: f64, rng: &mut R) -> Vec<f64> {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    parent1
        .iter()
        .zip(parent2)
        .map(|(&a, &b)| if rng.random::<f64>() < rate { a } else { b })
        .collect()
}

/// Single-point crossover.
///
/// With a single gene there is no interior cut point and the child is a
/// copy of `parent1`.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn single_point_crossover<R: Rng>(parent1: &[f64], parent2: &[f64], rng: &mut R) -> Vec<f64> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    if n < 2 {
        return parent1.to_vec();
    }
    let cut = rng.random_range(1..n);
    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&parent1[..cut]);
    child.extend_from_slice(&parent2[cut..]);
    child
}

/// Adds `noise` to each gene independently with probability `rate`.
///
/// Genes are not clamped here; the caller bounds the offspring afterwards.
pub fn gaussian_mutation<R: Rng>(
    mut genes: Vec<f64>,
    rate: f64,
    noise: &Normal<f64>,
    rng: &mut R,
) -> Vec<f64> {
    for gene in genes.iter_mut() {
        if rng.random::<f64>() < rate {
            *gene += noise.sample(rng);
        }
    }
    genes
}

/// Resamples each gene uniformly in the bounds with probability `rate`.
pub fn reset_mutation<R: Rng>(
    mut genes: Vec<f64>,
    rate: f64,
    space: &SearchSpace,
    rng: &mut R,
) -> Vec<f64> {
    for gene in genes.iter_mut() {
        if rng.random::<f64>() < rate {
            *gene = space.sample_value(rng);
        }
    }
    genes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_uniform_rate_one_copies_first_parent() {
        let mut rng = create_rng(42);
        let child = uniform_crossover(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], 1.0, &mut rng);
        assert_eq!(child, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_uniform_rate_zero_copies_second_parent() {
        let mut rng = create_rng(42);
        let child = uniform_crossover(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], 0.0, &mut rng);
        assert_eq!(child, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_uniform_genes_come_from_parents() {
        let mut rng = create_rng(9);
        let p1 = [1.0; 16];
        let p2 = [2.0; 16];
        let child = uniform_crossover(&p1, &p2, 0.5, &mut rng);
        assert!(child.iter().all(|&g| g == 1.0 || g == 2.0));
        assert!(child.contains(&1.0) && child.contains(&2.0));
    }

    #[test]
    fn test_single_point_prefix_suffix() {
        let mut rng = create_rng(42);
        let p1 = [0.0; 8];
        let p2 = [1.0; 8];
        for _ in 0..50 {
            let child = single_point_crossover(&p1, &p2, &mut rng);
            let cut = child.iter().position(|&g| g == 1.0).expect("cut in [1, n-1]");
            assert!((1..8).contains(&cut));
            assert!(child[..cut].iter().all(|&g| g == 0.0));
            assert!(child[cut..].iter().all(|&g| g == 1.0));
        }
    }

    #[test]
    fn test_single_point_single_gene() {
        let mut rng = create_rng(42);
        assert_eq!(single_point_crossover(&[3.0], &[7.0], &mut rng), vec![3.0]);
    }

    #[test]
    fn test_gaussian_rate_zero_is_identity() {
        let mut rng = create_rng(42);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let genes = gaussian_mutation(vec![0.5, -0.5], 0.0, &noise, &mut rng);
        assert_eq!(genes, vec![0.5, -0.5]);
    }

    #[test]
    fn test_gaussian_rate_one_perturbs_every_gene() {
        let mut rng = create_rng(42);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let genes = gaussian_mutation(vec![0.0; 10], 1.0, &noise, &mut rng);
        assert!(genes.iter().all(|&g| g != 0.0));
    }

    #[test]
    fn test_reset_stays_in_bounds() {
        let mut rng = create_rng(42);
        let space = SearchSpace::new(6, 10.0, 11.0).unwrap();
        let genes = reset_mutation(vec![0.0; 6], 1.0, &space, &mut rng);
        assert!(space.contains(&genes));
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_mismatched_parents_panic() {
        let mut rng = create_rng(42);
        uniform_crossover(&[1.0], &[1.0, 2.0], 0.5, &mut rng);
    }
}
