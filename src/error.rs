//! Error type shared by all optimizers.

use thiserror::Error;

/// Errors returned by optimizer construction and [`Optimizer::optimize`].
///
/// [`Optimizer::optimize`]: crate::Optimizer::optimize
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    /// `optimize` was called before an objective was configured.
    #[error("objective function not set")]
    ObjectiveNotSet,

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The objective returned NaN or an infinity.
    #[error("objective returned non-finite value {value} for population member {member}")]
    NonFiniteFitness {
        /// The offending objective value.
        value: f64,
        /// Index of the population member that produced it.
        member: usize,
    },
}

impl OptimizeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        OptimizeError::InvalidConfig(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OptimizeError>;
