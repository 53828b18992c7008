//! Core domain types for the Menucast engine.
//!
//! The crate holds everything the recommendation pipeline needs that does
//! not depend on a particular scoring policy: candidates and tags, the
//! category resolver, the weather normaliser, the allergy and dislike
//! filter, the dish catalogue and the `Scorer`/`Recommend` seams. All
//! functions here are pure and infallible; malformed input degrades to safe
//! defaults instead of failing.
//!
//! # Examples
//! ```
//! use menucast_core::{
//!     CategoryStrength, CategoryTable, WeatherFlag, WeatherObservation, WeatherSummary,
//! };
//!
//! let table = CategoryTable::new().with_leaf("soup", ["soup", "warm"]);
//! let resolution = table.resolve("Restaurant > Korean > Soup");
//! assert_eq!(resolution.strength, CategoryStrength::Leaf);
//!
//! let weather = WeatherSummary::from_observation(&WeatherObservation::new(4.0));
//! assert!(weather.flags.contains(WeatherFlag::Cold));
//! ```

mod allergy;
mod candidate;
mod catalog;
mod category;
mod preference;
mod recommendation;
mod reference;
mod scorer;
mod tag;
pub mod weather;

pub use allergy::{AllergenHints, DislikePolicy, PreferenceFilter, Verdict};
pub use candidate::Candidate;
pub use catalog::{DishCatalog, DishIndex, DishRecord, DishWeights};
pub use category::{
    CategoryResolution, CategoryStrength, CategoryTable, PATH_SEPARATORS, normalise_key,
    split_path,
};
pub use preference::UserPreference;
pub use recommendation::{
    Recommend, RecommendationRequest, RecommendationResult, ScoredCandidate,
};
pub use reference::ReferenceData;
pub use scorer::{Badge, ScoreCard, Scorer, ScoringInput};
pub use tag::{SOFT_MARKER, Tag, TagConfidence, TagSet, normalise_token};
pub use weather::{
    PrecipitationFamily, PrecipitationType, SkyCode, WeatherFlag, WeatherFlags,
    WeatherObservation, WeatherSummary, WeatherWeights,
};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
