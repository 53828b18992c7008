//! Error types raised while validating scoring configuration.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised by [`ScoreCoefficients::validate`](crate::ScoreCoefficients::validate)
/// and [`RecommendConfig::validate`](crate::RecommendConfig::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The coefficient layout version is not understood.
    #[error("coefficient version {found} is not supported (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the configuration.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },
    /// A coefficient was negative or not finite.
    #[error("coefficient {name} must be finite and non-negative, got {value}")]
    InvalidCoefficient {
        /// Field name of the offending coefficient.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The result cap was zero.
    #[error("max_results must be at least 1")]
    ZeroResults,
    /// The walking pace was unusable.
    #[error("walking pace must be finite and positive, got {pace}")]
    InvalidWalkingPace {
        /// Rejected pace in metres per minute.
        pace: f64,
    },
}
