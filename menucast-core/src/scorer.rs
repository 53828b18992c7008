//! Score candidates against the current weather and user preferences.
//!
//! The `Scorer` trait turns one resolved [`Candidate`](crate::Candidate) into
//! a [`ScoreCard`]: a scalar score plus the reasons and badges that justify
//! it.

use std::fmt;

use crate::{Candidate, CategoryStrength, DishRecord, TagSet, WeatherSummary};

/// Everything a scorer may consult for one candidate.
///
/// Built by the recommendation pipeline after category resolution, dish
/// lookup and preference filtering. Forbidden candidates never reach a
/// scorer.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    /// The candidate being scored.
    pub candidate: &'a Candidate,
    /// Resolved tags merged with the candidate's declared tags.
    pub tags: &'a TagSet,
    /// Which category table produced the resolved tags.
    pub strength: CategoryStrength,
    /// Weather weights and flags for this request.
    pub weather: &'a WeatherSummary,
    /// Matched dish, when the catalogue found one.
    pub dish: Option<&'a DishRecord>,
    /// Effective distance from the user in metres.
    pub distance_m: f64,
    /// Whether one of the tags is disliked by the user.
    pub disliked: bool,
}

/// A short label highlighting why a candidate was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Badge {
    /// The leaf category table matched.
    #[cfg_attr(feature = "serde", serde(rename = "exact match"))]
    ExactMatch,
    /// A dish from the catalogue matched.
    #[cfg_attr(feature = "serde", serde(rename = "menu info"))]
    MenuInfo,
    /// A weather bonus fired.
    #[cfg_attr(feature = "serde", serde(rename = "weather pick"))]
    WeatherPick,
}

impl Badge {
    /// Human-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactMatch => "exact match",
            Self::MenuInfo => "menu info",
            Self::WeatherPick => "weather pick",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score with its justification.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreCard {
    /// Final score in `[0.0, 1.0]`.
    pub score: f64,
    /// Ordered, human-readable reasons.
    pub reasons: Vec<String>,
    /// Badges in the order they were earned.
    pub badges: Vec<Badge>,
}

/// Calculate a recommendation score for a candidate.
///
/// Higher scores indicate a better pick for the current weather and user.
/// Implementations must be thread-safe (`Send` + `Sync`) so scorers can be
/// shared across request handlers. The method is infallible; implementers
/// should return the baseline when no information is available.
///
/// Implementations must:
/// - Produce finite scores.
/// - Normalise results to the range `0.0..=1.0`.
///
/// Use [`Scorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use menucast_core::{
///     Candidate, CategoryStrength, ScoreCard, Scorer, ScoringInput, TagSet, WeatherSummary,
/// };
///
/// struct UnitScorer;
///
/// impl Scorer for UnitScorer {
///     fn score(&self, _input: &ScoringInput<'_>) -> ScoreCard {
///         ScoreCard { score: Self::sanitise(1.5), ..ScoreCard::default() }
///     }
/// }
///
/// let candidate = Candidate::new(1, "Corner Café", "Cafe", 100.0);
/// let tags = TagSet::new();
/// let weather = WeatherSummary::default();
/// let input = ScoringInput {
///     candidate: &candidate,
///     tags: &tags,
///     strength: CategoryStrength::None,
///     weather: &weather,
///     dish: None,
///     distance_m: 100.0,
///     disliked: false,
/// };
/// assert_eq!(UnitScorer.score(&input).score, 1.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score card for `input`.
    fn score(&self, input: &ScoringInput<'_>) -> ScoreCard;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    #[must_use]
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Fixed;

    impl Scorer for Fixed {
        fn score(&self, _input: &ScoringInput<'_>) -> ScoreCard {
            ScoreCard::default()
        }
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    #[case(-0.2, 0.0)]
    #[case(0.4, 0.4)]
    #[case(1.7, 1.0)]
    fn sanitise_clamps(#[case] raw: f64, #[case] expected: f64) {
        assert_eq!(Fixed::sanitise(raw), expected);
    }

    #[test]
    fn badge_labels() {
        assert_eq!(Badge::ExactMatch.to_string(), "exact match");
        assert_eq!(Badge::WeatherPick.as_str(), "weather pick");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(Badge::ExactMatch)]
    #[case(Badge::MenuInfo)]
    #[case(Badge::WeatherPick)]
    fn badges_serialise_as_their_labels(#[case] badge: Badge) {
        let json = serde_json::to_string(&badge).expect("badge serialises");
        assert_eq!(json, format!("\"{}\"", badge.as_str()));
        let decoded: Badge = serde_json::from_str(&json).expect("badge decodes");
        assert_eq!(decoded, badge);
    }
}
