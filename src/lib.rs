//! Facade crate for the Menucast recommendation engine.
//!
//! This crate re-exports the core domain types and the default scorer, and
//! exposes the embedded reference bundle behind the `builtin-data` feature.

#![forbid(unsafe_code)]

use std::sync::Arc;

pub use menucast_core::{
    AllergenHints, Badge, Candidate, CategoryResolution, CategoryStrength, CategoryTable,
    DishCatalog, DishIndex, DishRecord, DishWeights, DislikePolicy, PrecipitationType, Recommend,
    RecommendationRequest, RecommendationResult, ReferenceData, ScoreCard, Scorer, ScoringInput,
    SkyCode, Tag, TagSet, UserPreference, WeatherFlag, WeatherFlags, WeatherObservation,
    WeatherSummary, WeatherWeights,
};
pub use menucast_scorer::{
    ConfigError, MenuScorer, RecommendConfig, Recommender, ScoreCoefficients,
};

#[cfg(feature = "builtin-data")]
pub use menucast_data::{ReferenceDataError, kma};

/// Build a recommender over the embedded reference bundle.
///
/// # Errors
/// Returns [`ReferenceDataError`] if the embedded bundle fails to decode.
///
/// # Examples
/// ```
/// use menucast::{Candidate, Recommend, RecommendationRequest, UserPreference, WeatherObservation};
///
/// let recommender = menucast::builtin_recommender()?;
/// let request = RecommendationRequest {
///     candidates: vec![Candidate::new(1, "Gukbap Alley", "음식점 > 한식 > 국밥", 150.0)],
///     weather: WeatherObservation::new(3.0),
///     preferences: UserPreference::new(),
///     origin: None,
/// };
/// let results = recommender.recommend(&request);
/// assert_eq!(results.len(), 1);
/// # Ok::<(), menucast::ReferenceDataError>(())
/// ```
#[cfg(feature = "builtin-data")]
pub fn builtin_recommender() -> Result<Recommender, ReferenceDataError> {
    let reference = menucast_data::builtin()?;
    Ok(Recommender::new(Arc::new(reference)))
}

/// Build a recommender over caller-supplied reference data.
#[must_use]
pub fn recommender(reference: ReferenceData) -> Recommender {
    Recommender::new(Arc::new(reference))
}
