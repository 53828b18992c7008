//! Weather-aware menu scoring.
#![forbid(unsafe_code)]

use menucast_core::{
    Badge, CategoryStrength, DishWeights, ScoreCard, Scorer, ScoringInput, TagSet, WeatherFlag,
    WeatherFlags,
};

use crate::ScoreCoefficients;

/// Tags that suit wet, windy or cold weather.
pub const WARM_FAMILY: [&str; 5] = ["warm", "soup", "hotpot", "broth", "stew"];
/// Tags that suit hot or muggy weather.
pub const COOL_FAMILY: [&str; 4] = ["cold", "salad", "refresh", "ice"];
/// Tags that suit a clear sky.
pub const CLEAR_FAMILY: [&str; 3] = ["picnic", "outdoor", "share"];

const WARM_TRIGGERS: [WeatherFlag; 4] = [
    WeatherFlag::Wet,
    WeatherFlag::Windy,
    WeatherFlag::FeelsCold,
    WeatherFlag::ColdMin,
];
const COOL_TRIGGERS: [WeatherFlag; 2] = [WeatherFlag::Hot, WeatherFlag::Muggy];

/// Scorer combining category fit, weather, curated dish weights and
/// distance.
///
/// The score is built additively from a strength-dependent base, a tag
/// diversity bonus, independent weather bonuses and a dataset bonus, minus a
/// capped distance penalty, then clamped into `[0.0, 1.0]`. Candidates with a
/// disliked tag receive the fixed dislike score instead.
///
/// # Examples
/// ```
/// use menucast_core::{
///     Badge, Candidate, CategoryStrength, Scorer, ScoringInput, TagSet, WeatherObservation,
///     WeatherSummary,
/// };
/// use menucast_scorer::MenuScorer;
///
/// let candidate = Candidate::new(1, "Gukbap Alley", "Restaurant > Korean > Soup", 100.0);
/// let tags = TagSet::from_raw(["soup", "warm", "broth"]);
/// let weather = WeatherSummary::from_observation(&WeatherObservation::new(4.0).with_wind(6.0));
/// let card = MenuScorer::default().score(&ScoringInput {
///     candidate: &candidate,
///     tags: &tags,
///     strength: CategoryStrength::Leaf,
///     weather: &weather,
///     dish: None,
///     distance_m: 100.0,
///     disliked: false,
/// });
///
/// assert!(card.score > 0.8);
/// assert_eq!(card.badges, vec![Badge::ExactMatch, Badge::WeatherPick]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MenuScorer {
    coefficients: ScoreCoefficients,
}

impl MenuScorer {
    /// Construct a scorer with explicit coefficients.
    #[must_use]
    pub const fn new(coefficients: ScoreCoefficients) -> Self {
        Self { coefficients }
    }

    /// Coefficients in use.
    #[must_use]
    pub const fn coefficients(&self) -> &ScoreCoefficients {
        &self.coefficients
    }

    const fn base(&self, strength: CategoryStrength, tags: &TagSet) -> f64 {
        match strength {
            CategoryStrength::Leaf => self.coefficients.base_leaf,
            CategoryStrength::Mid => self.coefficients.base_mid,
            CategoryStrength::None if tags.is_empty() => self.coefficients.base_none,
            CategoryStrength::None => self.coefficients.base_declared,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "diversity bonus scales the summed tag weight"
    )]
    fn diversity(&self, tags: &TagSet) -> f64 {
        let c = &self.coefficients;
        let mut bonus = (tags.total_weight() * c.diversity_per_weight).min(c.diversity_cap);
        if tags.len() >= c.rich_tag_count {
            bonus += c.rich_bonus;
        } else if tags.len() <= c.sparse_tag_count {
            bonus -= c.sparse_penalty;
        }
        bonus
    }

    /// Sum of the weather bonuses that fired, and whether any did.
    #[expect(clippy::float_arithmetic, reason = "weather bonuses stack additively")]
    fn weather_bonus(&self, tags: &TagSet, flags: &WeatherFlags) -> (f64, bool) {
        let c = &self.coefficients;
        let rules = [
            (flags.contains_any(&WARM_TRIGGERS), WARM_FAMILY.as_slice(), c.warm_bonus),
            (flags.contains_any(&COOL_TRIGGERS), COOL_FAMILY.as_slice(), c.cool_bonus),
            (flags.contains(WeatherFlag::Clear), CLEAR_FAMILY.as_slice(), c.clear_bonus),
        ];
        let mut total = 0.0;
        let mut fired = false;
        for (active, family, bonus) in rules {
            if active && tags.contains_any(family) {
                total += bonus;
                fired = true;
            }
        }
        (total, fired)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "curated dish weights scale into a small additive term"
    )]
    fn dataset_bonus(&self, weights: &DishWeights, flags: &WeatherFlags) -> f64 {
        let clamped = weights.clamped();
        let pairs = [
            (WeatherFlag::Rain, clamped.rain),
            (WeatherFlag::Snow, clamped.snow),
            (WeatherFlag::Clear, clamped.sun),
        ];
        pairs
            .iter()
            .filter(|(flag, _)| flags.contains(*flag))
            .map(|(_, weight)| weight * self.coefficients.dataset_scale)
            .sum()
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "penalty grows linearly with distance up to a cap"
    )]
    fn distance_penalty(&self, distance_m: f64) -> f64 {
        if !distance_m.is_finite() || distance_m <= 0.0 {
            return 0.0;
        }
        let c = &self.coefficients;
        (distance_m / 1000.0 * c.distance_per_km).min(c.distance_cap)
    }
}

impl Scorer for MenuScorer {
    #[expect(clippy::float_arithmetic, reason = "score terms are combined additively")]
    fn score(&self, input: &ScoringInput<'_>) -> ScoreCard {
        let flags = &input.weather.flags;
        let mut reasons = vec![strength_phrase(input.strength).to_owned()];
        let mut badges = Vec::new();

        if input.disliked {
            reasons.push("contains a disliked ingredient".to_owned());
            return ScoreCard {
                score: Self::sanitise(self.coefficients.dislike_score),
                reasons,
                badges,
            };
        }

        if input.strength == CategoryStrength::Leaf {
            badges.push(Badge::ExactMatch);
        }

        let mut score = self.base(input.strength, input.tags) + self.diversity(input.tags);

        if let Some(dish) = input.dish {
            reasons.push(format!("menu info: {}", dish.name));
            badges.push(Badge::MenuInfo);
            if let Some(weights) = dish.weights.as_ref() {
                score += self.dataset_bonus(weights, flags);
            }
        }

        let (bonus, fired) = self.weather_bonus(input.tags, flags);
        score += bonus;
        if fired {
            badges.push(Badge::WeatherPick);
        }
        if !flags.is_empty() {
            let labels: Vec<&str> = flags.iter().map(WeatherFlag::as_str).collect();
            reasons.push(format!("weather: {}", labels.join(", ")));
        }

        score -= self.distance_penalty(input.distance_m);

        ScoreCard {
            score: Self::sanitise(score),
            reasons,
            badges,
        }
    }
}

const fn strength_phrase(strength: CategoryStrength) -> &'static str {
    match strength {
        CategoryStrength::Leaf => "exact category match",
        CategoryStrength::Mid => "broad category match",
        CategoryStrength::None => "distance-based fallback",
    }
}
