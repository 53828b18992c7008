//! Ranking, truncation and walking ETA.
#![forbid(unsafe_code)]

use menucast_core::ScoredCandidate;

/// Sort scored candidates best first and keep at most `max_results`.
///
/// The sort is stable, so equal scores keep their input order, and uses
/// [`f64::total_cmp`] so the order is total even for unexpected values.
///
/// # Examples
/// ```
/// use menucast_core::{Candidate, ScoreCard, ScoredCandidate};
/// use menucast_scorer::rank;
///
/// let a = Candidate::new(1, "A", "Cafe", 10.0);
/// let b = Candidate::new(2, "B", "Cafe", 10.0);
/// let card = |score| ScoreCard { score, ..ScoreCard::default() };
/// let ranked = rank(
///     vec![
///         ScoredCandidate::new(&a, card(0.4), None, 10.0),
///         ScoredCandidate::new(&b, card(0.7), None, 10.0),
///     ],
///     5,
/// );
/// assert_eq!(ranked.first().map(|s| s.candidate.id), Some(2));
/// ```
#[must_use]
pub fn rank(mut scored: Vec<ScoredCandidate<'_>>, max_results: usize) -> Vec<ScoredCandidate<'_>> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(max_results);
    scored
}

/// Walking time in whole minutes, rounded up and never below one.
///
/// Unusable distances or paces yield the one-minute floor.
///
/// # Examples
/// ```
/// use menucast_scorer::eta_minutes;
///
/// assert_eq!(eta_minutes(0.0, 80.0), 1);
/// assert_eq!(eta_minutes(81.0, 80.0), 2);
/// assert_eq!(eta_minutes(800.0, 80.0), 10);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "minutes are a bounded, non-negative ceiling of distance over pace"
)]
pub fn eta_minutes(distance_m: f64, pace_m_per_min: f64) -> u32 {
    if !distance_m.is_finite() || !pace_m_per_min.is_finite() || pace_m_per_min <= 0.0 {
        return 1;
    }
    let minutes = (distance_m.max(0.0) / pace_m_per_min).ceil();
    if minutes >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    (minutes as u32).max(1)
}
