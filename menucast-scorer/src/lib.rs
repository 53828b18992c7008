//! Scoring and ranking for Menucast recommendations.
//!
//! The crate turns the pure building blocks of `menucast-core` into a
//! complete recommendation pipeline:
//! - [`MenuScorer`] implements the [`Scorer`](menucast_core::Scorer) trait,
//!   combining category fit, weather bonuses, curated dish weights and a
//!   capped distance penalty into a score in `0.0..=1.0` with reasons and
//!   badges.
//! - [`rank`] sorts scored candidates stably and truncates them, and
//!   [`eta_minutes`] estimates walking time.
//! - [`Recommender`] implements [`Recommend`](menucast_core::Recommend),
//!   wiring weather normalisation, category resolution, dish lookup,
//!   preference filtering, scoring and ranking.
//!
//! All constants live in the versioned [`ScoreCoefficients`] struct.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use menucast_core::{Recommend, RecommendationRequest, ReferenceData, UserPreference, WeatherObservation};
//! use menucast_scorer::Recommender;
//!
//! let recommender = Recommender::new(Arc::new(ReferenceData::default()));
//! let request = RecommendationRequest {
//!     candidates: Vec::new(),
//!     weather: WeatherObservation::new(20.0),
//!     preferences: UserPreference::new(),
//!     origin: None,
//! };
//! assert!(recommender.recommend(&request).is_empty());
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod coefficients;
mod error;
mod menu;
mod rank;
mod recommender;

pub use coefficients::{
    COEFFICIENTS_VERSION, DEFAULT_MAX_RESULTS, DEFAULT_WALKING_PACE_M_PER_MIN, RecommendConfig,
    ScoreCoefficients,
};
pub use error::ConfigError;
pub use menu::{CLEAR_FAMILY, COOL_FAMILY, MenuScorer, WARM_FAMILY};
pub use rank::{eta_minutes, rank};
pub use recommender::Recommender;
