//! Test-only fixtures shared by unit, behaviour and downstream tests.

use crate::{
    AllergenHints, Badge, Candidate, CategoryStrength, CategoryTable, DishIndex, DishRecord,
    DishWeights, ReferenceData, ScoreCard, Scorer, ScoringInput, TagSet,
};

/// Test `Scorer` that scores by category strength alone.
///
/// Leaf matches score `0.9`, mid matches `0.6` and everything else `0.3`.
/// Disliked candidates score `0.0`.
#[derive(Debug, Copy, Clone, Default)]
pub struct StrengthScorer;

impl Scorer for StrengthScorer {
    fn score(&self, input: &ScoringInput<'_>) -> ScoreCard {
        let score = if input.disliked {
            0.0
        } else {
            match input.strength {
                CategoryStrength::Leaf => 0.9,
                CategoryStrength::Mid => 0.6,
                CategoryStrength::None => 0.3,
            }
        };
        let badges = if input.strength == CategoryStrength::Leaf {
            vec![Badge::ExactMatch]
        } else {
            Vec::new()
        };
        ScoreCard {
            score: Self::sanitise(score),
            reasons: vec![input.strength.to_string()],
            badges,
        }
    }
}

/// A small category table covering soups, cold dishes and snacks.
#[must_use]
pub fn sample_categories() -> CategoryTable {
    CategoryTable::new()
        .with_leaf("soup", ["soup", "warm", "broth"])
        .with_leaf("hotpot", ["hotpot", "warm", "share"])
        .with_leaf("cold noodle", ["cold", "noodle", "refresh"])
        .with_leaf("salad", ["salad", "cold", "light~"])
        .with_leaf("seafood", ["seafood", "shellfish~"])
        .with_mid("korean", ["korean", "rice~"])
        .with_mid("snack", ["snack", "light"])
        .with_mid("cafe", ["cafe", "dessert~"])
}

/// Allergen groups for shellfish and peanuts.
#[must_use]
pub fn sample_allergens() -> AllergenHints {
    AllergenHints::new()
        .with_group(["shellfish", "갑각류", "crab", "shrimp", "lobster"])
        .with_group(["peanut", "땅콩"])
}

/// Two dishes: a rainy-day soup and a sunny-day noodle.
#[must_use]
pub fn sample_dishes() -> DishIndex {
    DishIndex::from_records([
        DishRecord::new("haejangguk")
            .with_keys(["soup"])
            .with_tags(TagSet::from_raw(["soup", "warm"]))
            .with_weights(DishWeights {
                rain: 0.9,
                snow: 0.8,
                sun: 0.1,
            }),
        DishRecord::new("naengmyeon")
            .with_keys(["cold noodle"])
            .with_tags(TagSet::from_raw(["cold", "noodle"]))
            .with_weights(DishWeights {
                rain: 0.1,
                snow: 0.0,
                sun: 0.9,
            }),
    ])
}

/// Reference data bundling the sample tables.
#[must_use]
pub fn sample_reference() -> ReferenceData {
    ReferenceData::new(sample_categories(), sample_allergens(), sample_dishes())
}

/// A candidate at `distance_m` with the given category string.
#[must_use]
pub fn candidate(id: u64, category: &str, distance_m: f64) -> Candidate {
    Candidate::new(id, &format!("candidate {id}"), category, distance_m)
}
