//! Box-bounded search space and clamping utilities.
//!
//! All three strategies share the same axis-aligned box: every coordinate
//! lives in `[lower_bound, upper_bound]`. Update steps may leave the box
//! transiently; [`SearchSpace::clamp`] pulls a vector back in before it is
//! evaluated or recorded.

use crate::error::{OptimizeError, Result};
use rand::Rng;

/// A `dim`-dimensional box `[lower_bound, upper_bound]^dim`.
///
/// # Examples
///
/// ```
/// use popheur::SearchSpace;
///
/// let space = SearchSpace::new(3, -5.0, 5.0).unwrap();
/// let mut x = vec![-7.0, 0.5, 9.0];
/// space.clamp(&mut x);
/// assert_eq!(x, vec![-5.0, 0.5, 5.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchSpace {
    dim: usize,
    lower_bound: f64,
    upper_bound: f64,
}

impl SearchSpace {
    /// Creates a validated search space.
    ///
    /// Fails if `dim == 0`, either bound is not finite,
    /// `lower_bound >= upper_bound`, or the width overflows `f64`.
    pub fn new(dim: usize, lower_bound: f64, upper_bound: f64) -> Result<Self> {
        if dim == 0 {
            return Err(OptimizeError::invalid("dim must be at least 1"));
        }
        if !lower_bound.is_finite() || !upper_bound.is_finite() {
            return Err(OptimizeError::invalid(format!(
                "bounds must be finite, got [{lower_bound}, {upper_bound}]"
            )));
        }
        if lower_bound >= upper_bound {
            return Err(OptimizeError::invalid(format!(
                "lower_bound ({lower_bound}) must be < upper_bound ({upper_bound})"
            )));
        }
        if !(upper_bound - lower_bound).is_finite() {
            return Err(OptimizeError::invalid(format!(
                "bound range overflows, got [{lower_bound}, {upper_bound}]"
            )));
        }
        Ok(Self {
            dim,
            lower_bound,
            upper_bound,
        })
    }

    /// Number of coordinates per point.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Width of the box along each axis.
    pub fn range(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Clamps a single coordinate into the bounds.
    #[inline]
    pub fn clamp_value(&self, x: f64) -> f64 {
        x.clamp(self.lower_bound, self.upper_bound)
    }

    /// Clamps every coordinate of `x` into the bounds in place.
    pub fn clamp(&self, x: &mut [f64]) {
        for v in x.iter_mut() {
            *v = self.clamp_value(*v);
        }
    }

    /// Returns `true` if every coordinate of `x` lies within the bounds.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dim
            && x
                .iter()
                .all(|&v| v >= self.lower_bound && v <= self.upper_bound)
    }

    /// Samples a point uniformly inside the box.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.dim)
            .map(|_| rng.random_range(self.lower_bound..self.upper_bound))
            .collect()
    }

    /// Samples a single coordinate uniformly inside the bounds.
    pub fn sample_value<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.lower_bound..self.upper_bound)
    }
}
