//! Versioned scoring coefficients and recommender configuration.
#![forbid(unsafe_code)]

use menucast_core::DislikePolicy;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Version of the coefficient layout understood by this crate.
pub const COEFFICIENTS_VERSION: u32 = 1;

/// Default number of recommendations returned.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Default walking pace in metres per minute.
pub const DEFAULT_WALKING_PACE_M_PER_MIN: f64 = 80.0;

/// Hand-tuned constants used by [`MenuScorer`](crate::MenuScorer).
///
/// Every field is an additive score term or a cap on one. The struct is
/// versioned so serialised overrides written for an older layout are
/// rejected instead of silently misapplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreCoefficients {
    /// Layout version; must equal [`COEFFICIENTS_VERSION`].
    pub version: u32,
    /// Base score for a leaf category match.
    pub base_leaf: f64,
    /// Base score for a mid category match.
    pub base_mid: f64,
    /// Base score when only declared tags are known.
    pub base_declared: f64,
    /// Base score when nothing is known.
    pub base_none: f64,
    /// Score forced onto candidates carrying a disliked tag.
    pub dislike_score: f64,
    /// Bonus per unit of tag weight.
    pub diversity_per_weight: f64,
    /// Cap on the tag weight bonus.
    pub diversity_cap: f64,
    /// Bonus when at least [`Self::rich_tag_count`] distinct tags are present.
    pub rich_bonus: f64,
    /// Distinct tag count that earns [`Self::rich_bonus`].
    pub rich_tag_count: usize,
    /// Penalty when at most [`Self::sparse_tag_count`] distinct tags are present.
    pub sparse_penalty: f64,
    /// Distinct tag count at or below which [`Self::sparse_penalty`] applies.
    pub sparse_tag_count: usize,
    /// Bonus for warming dishes in wet, windy or cold weather.
    pub warm_bonus: f64,
    /// Bonus for cooling dishes in hot or muggy weather.
    pub cool_bonus: f64,
    /// Bonus for shareable or outdoor food under a clear sky.
    pub clear_bonus: f64,
    /// Multiplier applied to curated dish weights.
    pub dataset_scale: f64,
    /// Penalty per kilometre of distance.
    pub distance_per_km: f64,
    /// Cap on the distance penalty.
    pub distance_cap: f64,
}

impl Default for ScoreCoefficients {
    fn default() -> Self {
        Self {
            version: COEFFICIENTS_VERSION,
            base_leaf: 0.65,
            base_mid: 0.55,
            base_declared: 0.50,
            base_none: 0.45,
            dislike_score: 0.05,
            diversity_per_weight: 0.05,
            diversity_cap: 0.2,
            rich_bonus: 0.05,
            rich_tag_count: 3,
            sparse_penalty: 0.05,
            sparse_tag_count: 1,
            warm_bonus: 0.08,
            cool_bonus: 0.08,
            clear_bonus: 0.03,
            dataset_scale: 0.1,
            distance_per_km: 0.05,
            distance_cap: 0.2,
        }
    }
}

impl ScoreCoefficients {
    /// Validate the coefficients and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedVersion`] for an unknown layout and
    /// [`ConfigError::InvalidCoefficient`] when any value is negative or not
    /// finite.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.version != COEFFICIENTS_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                expected: COEFFICIENTS_VERSION,
            });
        }
        for (name, value) in self.named_values() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidCoefficient { name, value });
            }
        }
        Ok(self)
    }

    const fn named_values(&self) -> [(&'static str, f64); 15] {
        [
            ("base_leaf", self.base_leaf),
            ("base_mid", self.base_mid),
            ("base_declared", self.base_declared),
            ("base_none", self.base_none),
            ("dislike_score", self.dislike_score),
            ("diversity_per_weight", self.diversity_per_weight),
            ("diversity_cap", self.diversity_cap),
            ("rich_bonus", self.rich_bonus),
            ("sparse_penalty", self.sparse_penalty),
            ("warm_bonus", self.warm_bonus),
            ("cool_bonus", self.cool_bonus),
            ("clear_bonus", self.clear_bonus),
            ("dataset_scale", self.dataset_scale),
            ("distance_per_km", self.distance_per_km),
            ("distance_cap", self.distance_cap),
        ]
    }
}

/// Pure configuration for a [`Recommender`](crate::Recommender).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Maximum number of results returned.
    pub max_results: usize,
    /// Walking pace used for ETA estimates.
    pub walking_pace_m_per_min: f64,
    /// Scoring constants.
    pub coefficients: ScoreCoefficients,
    /// How disliked tags are treated.
    pub dislike_policy: DislikePolicy,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            walking_pace_m_per_min: DEFAULT_WALKING_PACE_M_PER_MIN,
            coefficients: ScoreCoefficients::default(),
            dislike_policy: DislikePolicy::default(),
        }
    }
}

impl RecommendConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroResults`] when `max_results` is zero,
    /// [`ConfigError::InvalidWalkingPace`] for a non-positive or non-finite
    /// pace, and propagates [`ScoreCoefficients::validate`] failures.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::ZeroResults);
        }
        if !self.walking_pace_m_per_min.is_finite() || self.walking_pace_m_per_min <= 0.0 {
            return Err(ConfigError::InvalidWalkingPace {
                pace: self.walking_pace_m_per_min,
            });
        }
        self.coefficients.validate()?;
        Ok(self)
    }

    /// Replace the result cap.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Replace the walking pace.
    #[must_use]
    pub const fn with_walking_pace(mut self, pace_m_per_min: f64) -> Self {
        self.walking_pace_m_per_min = pace_m_per_min;
        self
    }

    /// Replace the dislike policy.
    #[must_use]
    pub const fn with_dislike_policy(mut self, policy: DislikePolicy) -> Self {
        self.dislike_policy = policy;
        self
    }
}
