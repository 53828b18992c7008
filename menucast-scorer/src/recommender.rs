//! End-to-end recommendation pipeline.
#![forbid(unsafe_code)]

use std::sync::Arc;

use menucast_core::{
    Candidate, DishCatalog, DishRecord, PreferenceFilter, Recommend, RecommendationRequest,
    RecommendationResult, ReferenceData, ScoredCandidate, Scorer, ScoringInput, TagSet,
    UserPreference, Verdict, WeatherSummary,
};

use crate::{ConfigError, MenuScorer, RecommendConfig, eta_minutes, rank};

/// Weather-aware recommender wiring resolution, filtering, scoring and
/// ranking.
///
/// Reference data is shared read-only through `Arc`, so a recommender is
/// cheap to clone and safe to use from several threads at once.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use menucast_core::{
///     Candidate, CategoryTable, Recommend, RecommendationRequest, ReferenceData,
///     UserPreference, WeatherObservation,
/// };
/// use menucast_scorer::Recommender;
///
/// let reference = ReferenceData::new(
///     CategoryTable::new().with_leaf("soup", ["soup", "warm"]),
///     Default::default(),
///     Default::default(),
/// );
/// let recommender = Recommender::new(Arc::new(reference));
/// let request = RecommendationRequest {
///     candidates: vec![
///         Candidate::new(1, "Burger Stop", "Restaurant > Fast Food", 150.0),
///         Candidate::new(2, "Gukbap Alley", "Restaurant > Korean > Soup", 150.0),
///     ],
///     weather: WeatherObservation::new(3.0),
///     preferences: UserPreference::new(),
///     origin: None,
/// };
///
/// let results = recommender.recommend(&request);
/// assert_eq!(results.first().map(|r| r.candidate_id), Some(2));
/// ```
#[derive(Clone)]
pub struct Recommender<S: Scorer = MenuScorer> {
    reference: Arc<ReferenceData>,
    catalog: Option<Arc<dyn DishCatalog>>,
    scorer: S,
    config: RecommendConfig,
}

impl Recommender<MenuScorer> {
    /// Construct a recommender with the default configuration.
    #[must_use]
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        let config = RecommendConfig::default();
        Self {
            reference,
            catalog: None,
            scorer: MenuScorer::new(config.coefficients),
            config,
        }
    }

    /// Construct a recommender from a validated configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails
    /// [`RecommendConfig::validate`].
    pub fn with_config(
        reference: Arc<ReferenceData>,
        config: RecommendConfig,
    ) -> Result<Self, ConfigError> {
        let validated = config.validate()?;
        Ok(Self {
            reference,
            catalog: None,
            scorer: MenuScorer::new(validated.coefficients),
            config: validated,
        })
    }
}

impl<S: Scorer> Recommender<S> {
    /// Construct a recommender around a custom scorer.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails
    /// [`RecommendConfig::validate`].
    pub fn with_scorer(
        reference: Arc<ReferenceData>,
        scorer: S,
        config: RecommendConfig,
    ) -> Result<Self, ConfigError> {
        let validated = config.validate()?;
        Ok(Self {
            reference,
            catalog: None,
            scorer,
            config: validated,
        })
    }

    /// Use `catalog` for dish lookups instead of the reference dishes.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<dyn DishCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// Shared reference data.
    #[must_use]
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    fn catalog(&self) -> &dyn DishCatalog {
        self.catalog.as_deref().unwrap_or(&self.reference.dishes)
    }

    /// Score every candidate that survives preference filtering, in input
    /// order.
    #[must_use]
    pub fn score_all<'a>(
        &self,
        request: &'a RecommendationRequest,
        weather: &WeatherSummary,
    ) -> Vec<ScoredCandidate<'a>> {
        request
            .candidates
            .iter()
            .filter_map(|candidate| self.score_one(candidate, request, weather))
            .collect()
    }

    fn score_one<'a>(
        &self,
        candidate: &'a Candidate,
        request: &RecommendationRequest,
        weather: &WeatherSummary,
    ) -> Option<ScoredCandidate<'a>> {
        let resolution = self
            .reference
            .categories
            .resolve_levels(&candidate.category_path);
        let mut tags = resolution.tags.clone();
        tags.extend(candidate.tags.iter().cloned());

        let dish = self
            .catalog()
            .lookup(&tags, resolution.matched_key.as_deref());
        if let Some(record) = dish {
            tags.extend(record.tags.iter().cloned());
        }

        let filter = PreferenceFilter::new(&self.reference.allergens, self.config.dislike_policy);
        let verdict = verdict_for(&filter, &request.preferences, candidate, &tags, dish);
        if let Verdict::Forbidden { allergen, tag } = &verdict {
            log::debug!(
                "excluding candidate {} ({}): {allergen} matches {tag}",
                candidate.id,
                candidate.name
            );
            return None;
        }

        let distance_m = candidate.effective_distance(request.origin);
        let card = self.scorer.score(&ScoringInput {
            candidate,
            tags: &tags,
            strength: resolution.strength,
            weather,
            dish,
            distance_m,
            disliked: matches!(verdict, Verdict::Disliked { .. }),
        });
        Some(ScoredCandidate::new(
            candidate,
            card,
            dish.map(|record| record.name.clone()),
            distance_m,
        ))
    }
}

/// Check resolved tags, then declared and dish allergens.
fn verdict_for(
    filter: &PreferenceFilter<'_>,
    preferences: &UserPreference,
    candidate: &Candidate,
    tags: &TagSet,
    dish: Option<&DishRecord>,
) -> Verdict {
    let verdict = filter.verdict(preferences, tags);
    if matches!(verdict, Verdict::Forbidden { .. }) {
        return verdict;
    }
    let mut declared = TagSet::from_raw(&candidate.allergens);
    if let Some(record) = dish {
        declared.extend(TagSet::from_raw(&record.allergens).iter().cloned());
    }
    filter
        .allergen_conflict(preferences, &declared)
        .map_or(verdict, |(allergen, tag)| Verdict::Forbidden { allergen, tag })
}

impl<S: Scorer> Recommend for Recommender<S> {
    fn recommend(&self, request: &RecommendationRequest) -> Vec<RecommendationResult> {
        if request.candidates.is_empty() {
            return Vec::new();
        }
        let weather = WeatherSummary::from_observation(&request.weather);
        let scored = self.score_all(request, &weather);
        log::debug!(
            "scored {} of {} candidate(s)",
            scored.len(),
            request.candidates.len()
        );
        rank(scored, self.config.max_results)
            .into_iter()
            .map(|entry| {
                let eta = eta_minutes(entry.distance_m, self.config.walking_pace_m_per_min);
                entry.into_result(eta)
            })
            .collect()
    }
}

impl<S: Scorer + std::fmt::Debug> std::fmt::Debug for Recommender<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("reference", &self.reference)
            .field("custom_catalog", &self.catalog.is_some())
            .field("scorer", &self.scorer)
            .field("config", &self.config)
            .finish()
    }
}
