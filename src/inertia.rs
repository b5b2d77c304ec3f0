//! Linear inertia-weight schedule shared by PSO and SMA.

use crate::error::{OptimizeError, Result};

/// Linearly interpolates the inertia weight from `w_start` to `w_end`.
///
/// At iteration `t` of a run of `total` iterations the weight is
/// `w_start + t / (total - 1) * (w_end - w_start)`, so the first iteration
/// uses `w_start` and the last uses `w_end`. The schedule needs at least
/// two iterations; [`InertiaDecay::check_budget`] enforces it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InertiaDecay {
    pub w_start: f64,
    pub w_end: f64,
}

impl Default for InertiaDecay {
    fn default() -> Self {
        Self {
            w_start: 0.9,
            w_end: 0.4,
        }
    }
}

impl InertiaDecay {
    pub fn new(w_start: f64, w_end: f64) -> Self {
        Self { w_start, w_end }
    }

    /// Rejects non-finite endpoints.
    pub fn validate(&self) -> Result<()> {
        if !self.w_start.is_finite() || !self.w_end.is_finite() {
            return Err(OptimizeError::invalid(format!(
                "inertia decay endpoints must be finite, got {} -> {}",
                self.w_start, self.w_end
            )));
        }
        Ok(())
    }

    /// Rejects budgets that would divide by zero.
    pub fn check_budget(&self, total: usize) -> Result<()> {
        if total < 2 {
            return Err(OptimizeError::invalid(format!(
                "inertia decay needs at least 2 iterations, got {total}"
            )));
        }
        Ok(())
    }

    /// Weight for iteration `t` (0-based) out of `total`.
    ///
    /// `total` must be at least 2.
    pub fn weight_at(&self, t: usize, total: usize) -> f64 {
        debug_assert!(total >= 2, "inertia decay requires total >= 2");
        let ratio = t as f64 / (total - 1) as f64;
        self.w_start + ratio * (self.w_end - self.w_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let decay = InertiaDecay::new(0.9, 0.4);
        assert!((decay.weight_at(0, 10) - 0.9).abs() < 1e-12);
        assert!((decay.weight_at(9, 10) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_midpoint() {
        let decay = InertiaDecay::new(1.0, 0.0);
        assert!((decay.weight_at(2, 5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_non_finite_endpoints() {
        assert!(InertiaDecay::new(f64::NAN, 0.4).validate().is_err());
        assert!(InertiaDecay::new(0.9, f64::INFINITY).validate().is_err());
        assert!(InertiaDecay::default().validate().is_ok());
    }

    #[test]
    fn test_budget_check() {
        let decay = InertiaDecay::default();
        assert!(decay.check_budget(0).is_err());
        assert!(decay.check_budget(1).is_err());
        assert!(decay.check_budget(2).is_ok());
    }
}
