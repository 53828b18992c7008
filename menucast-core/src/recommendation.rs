use geo::Coord;

use crate::{Badge, Candidate, ScoreCard, UserPreference, WeatherObservation};

/// Parameters for a recommendation request.
///
/// The request captures the candidate places, the current weather, the
/// user's allergens and dislikes, and optionally the user's position for
/// candidates that carry coordinates instead of a distance.
///
/// # Examples
/// ```rust
/// use menucast_core::{Candidate, RecommendationRequest, UserPreference, WeatherObservation};
///
/// let request = RecommendationRequest {
///     candidates: vec![Candidate::new(1, "Gukbap Alley", "Restaurant > Korean > Soup", 120.0)],
///     weather: WeatherObservation::new(4.0),
///     preferences: UserPreference::new(),
///     origin: None,
/// };
/// assert_eq!(request.candidates.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendationRequest {
    /// Places to rank, in provider order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub candidates: Vec<Candidate>,
    /// Current weather at the user's position.
    pub weather: WeatherObservation,
    /// Allergens and dislikes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferences: UserPreference,
    /// User position, used when a candidate lacks a distance.
    #[cfg_attr(feature = "serde", serde(default))]
    pub origin: Option<Coord<f64>>,
}

/// A candidate that survived filtering, with its score card.
///
/// Borrowed from the request; converted into a [`RecommendationResult`]
/// once ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<'a> {
    /// The scored candidate.
    pub candidate: &'a Candidate,
    /// Score in `[0.0, 1.0]`.
    pub score: f64,
    /// Ordered reasons.
    pub reasons: Vec<String>,
    /// Badges earned.
    pub badges: Vec<Badge>,
    /// Matched dish name.
    pub dish: Option<String>,
    /// Effective distance in metres.
    pub distance_m: f64,
}

impl<'a> ScoredCandidate<'a> {
    /// Attach a score card to a candidate.
    #[must_use]
    pub fn new(
        candidate: &'a Candidate,
        card: ScoreCard,
        dish: Option<String>,
        distance_m: f64,
    ) -> Self {
        Self {
            candidate,
            score: card.score,
            reasons: card.reasons,
            badges: card.badges,
            dish,
            distance_m,
        }
    }

    /// Produce the owned output record with the supplied walking ETA.
    #[must_use]
    pub fn into_result(self, eta_mins: u32) -> RecommendationResult {
        RecommendationResult {
            candidate_id: self.candidate.id,
            name: self.candidate.name.clone(),
            score: self.score,
            reasons: self.reasons,
            badges: self.badges,
            eta_mins,
            dish: self.dish,
        }
    }
}

/// One ranked recommendation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendationResult {
    /// Identifier of the recommended candidate.
    pub candidate_id: u64,
    /// Display name.
    pub name: String,
    /// Score in `[0.0, 1.0]`.
    pub score: f64,
    /// Human-readable reasons, most important first.
    pub reasons: Vec<String>,
    /// Badges earned.
    pub badges: Vec<Badge>,
    /// Walking time in whole minutes, at least one.
    pub eta_mins: u32,
    /// Matched dish name, when known.
    pub dish: Option<String>,
}

/// Produce ranked recommendations for a request.
///
/// Implementations are infallible: malformed input degrades to baseline
/// scores rather than errors. Zero candidates yield an empty list.
/// Recommenders must be `Send + Sync` to operate safely across threads.
pub trait Recommend: Send + Sync {
    /// Rank the request's candidates, best first.
    fn recommend(&self, request: &RecommendationRequest) -> Vec<RecommendationResult>;
}
