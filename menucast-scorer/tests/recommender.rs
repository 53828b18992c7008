//! Integration coverage for recommender configuration seams.

use std::sync::Arc;

use geo::Coord;
use menucast_core::test_support::{StrengthScorer, candidate, sample_reference};
use menucast_core::{
    Badge, Candidate, DishCatalog, DishIndex, DishRecord, DislikePolicy, PrecipitationType,
    Recommend, RecommendationRequest, RecommendationResult, TagSet, UserPreference,
    WeatherObservation,
};
use menucast_scorer::{ConfigError, RecommendConfig, Recommender};
use rstest::{fixture, rstest};

#[fixture]
fn mild() -> WeatherObservation {
    WeatherObservation::new(22.0)
}

fn request(
    candidates: Vec<Candidate>,
    weather: WeatherObservation,
    preferences: UserPreference,
) -> RecommendationRequest {
    RecommendationRequest {
        candidates,
        weather,
        preferences,
        origin: None,
    }
}

fn ids(results: &[RecommendationResult]) -> Vec<u64> {
    results.iter().map(|result| result.candidate_id).collect()
}

#[rstest]
fn custom_scorer_drives_ranking(mild: WeatherObservation) {
    let recommender = Recommender::with_scorer(
        Arc::new(sample_reference()),
        StrengthScorer,
        RecommendConfig::default(),
    )
    .expect("default config is valid");
    let results = recommender.recommend(&request(
        vec![
            candidate(1, "Shop > Stationery", 10.0),
            candidate(2, "Restaurant > Snack", 10.0),
            candidate(3, "Restaurant > Korean > Soup", 10.0),
        ],
        mild,
        UserPreference::new(),
    ));
    assert_eq!(ids(&results), vec![3, 2, 1]);
    let scores: Vec<f64> = results.iter().map(|result| result.score).collect();
    assert_eq!(scores, vec![0.9, 0.6, 0.3]);
}

#[rstest]
fn max_results_truncates(mild: WeatherObservation) {
    let recommender = Recommender::with_config(
        Arc::new(sample_reference()),
        RecommendConfig::default().with_max_results(2),
    )
    .expect("valid config");
    let candidates = (1..=6)
        .map(|id| candidate(id, "Restaurant > Snack", 100.0))
        .collect();
    let results = recommender.recommend(&request(candidates, mild, UserPreference::new()));
    assert_eq!(ids(&results), vec![1, 2]);
}

#[rstest]
fn default_returns_at_most_five(mild: WeatherObservation) {
    let recommender = Recommender::new(Arc::new(sample_reference()));
    let candidates = (1..=9)
        .map(|id| candidate(id, "Restaurant > Snack", 100.0))
        .collect();
    let results = recommender.recommend(&request(candidates, mild, UserPreference::new()));
    assert_eq!(results.len(), 5);
}

#[rstest]
fn invalid_config_is_rejected() {
    let outcome = Recommender::with_config(
        Arc::new(sample_reference()),
        RecommendConfig::default().with_max_results(0),
    );
    assert_eq!(outcome.err(), Some(ConfigError::ZeroResults));
}

#[rstest]
fn custom_catalog_overrides_reference_dishes(mild: WeatherObservation) {
    let catalog: Arc<dyn DishCatalog> = Arc::new(DishIndex::from_records([
        DishRecord::new("tteokbokki").with_keys(["snack"]),
    ]));
    let recommender = Recommender::new(Arc::new(sample_reference())).with_catalog(catalog);
    let results = recommender.recommend(&request(
        vec![candidate(1, "Restaurant > Snack", 100.0)],
        mild,
        UserPreference::new(),
    ));
    let first = results.first().expect("one result");
    assert_eq!(first.dish.as_deref(), Some("tteokbokki"));
    assert!(first.badges.contains(&Badge::MenuInfo));
    assert!(first.reasons.contains(&"menu info: tteokbokki".to_owned()));
}

#[rstest]
fn reference_dishes_attach_menu_info(mild: WeatherObservation) {
    let recommender = Recommender::new(Arc::new(sample_reference()));
    let results = recommender.recommend(&request(
        vec![candidate(1, "Restaurant > Korean > Soup", 100.0)],
        mild,
        UserPreference::new(),
    ));
    assert_eq!(
        results.first().and_then(|result| result.dish.clone()),
        Some("haejangguk".to_owned())
    );
}

#[rstest]
fn declared_allergens_exclude_candidates(mild: WeatherObservation) {
    let recommender = Recommender::new(Arc::new(sample_reference()));
    let satay = candidate(1, "Restaurant > Snack", 100.0).with_allergens(["Peanut"]);
    let plain = candidate(2, "Restaurant > Snack", 100.0);
    let results = recommender.recommend(&request(
        vec![satay, plain],
        mild,
        UserPreference::new().with_allergy("땅콩"),
    ));
    assert_eq!(ids(&results), vec![2]);
}

#[rstest]
fn dish_allergens_exclude_candidates(mild: WeatherObservation) {
    let catalog: Arc<dyn DishCatalog> = Arc::new(DishIndex::from_records([
        DishRecord::new("kkotgetang")
            .with_keys(["soup"])
            .with_allergens(["crab"]),
    ]));
    let recommender = Recommender::new(Arc::new(sample_reference())).with_catalog(catalog);
    let results = recommender.recommend(&request(
        vec![
            candidate(1, "Restaurant > Korean > Soup", 100.0),
            candidate(2, "Restaurant > Snack", 100.0),
        ],
        mild,
        UserPreference::new().with_allergy("shellfish"),
    ));
    assert_eq!(ids(&results), vec![2]);
}

#[rstest]
fn dislikes_demote_by_default(mild: WeatherObservation) {
    let recommender = Recommender::new(Arc::new(sample_reference()));
    let results = recommender.recommend(&request(
        vec![
            candidate(1, "Restaurant > Korean > Soup", 100.0),
            candidate(2, "Restaurant > Snack", 100.0),
        ],
        mild,
        UserPreference::new().with_dislike("broth"),
    ));
    assert_eq!(ids(&results), vec![2, 1]);
    let demoted = results.last().expect("two results");
    assert!(
        demoted
            .reasons
            .contains(&"contains a disliked ingredient".to_owned())
    );
}

#[rstest]
fn exclude_policy_drops_disliked_candidates(mild: WeatherObservation) {
    let recommender = Recommender::with_config(
        Arc::new(sample_reference()),
        RecommendConfig::default().with_dislike_policy(DislikePolicy::Exclude),
    )
    .expect("valid config");
    let results = recommender.recommend(&request(
        vec![
            candidate(1, "Restaurant > Korean > Soup", 100.0),
            candidate(2, "Restaurant > Snack", 100.0),
        ],
        mild,
        UserPreference::new().with_dislike("broth"),
    ));
    assert_eq!(ids(&results), vec![2]);
}

#[rstest]
fn declared_tags_merge_with_resolved_tags() {
    let rainy = WeatherObservation::new(18.0).with_precipitation(PrecipitationType::Rain, 3.0);
    let recommender = Recommender::new(Arc::new(sample_reference()));
    let plain = candidate(1, "Restaurant > Snack", 100.0);
    let stew = candidate(2, "Restaurant > Snack", 100.0).with_tags(TagSet::from_raw(["stew"]));
    let results = recommender.recommend(&request(vec![plain, stew], rainy, UserPreference::new()));
    assert_eq!(ids(&results), vec![2, 1]);
    assert!(
        results
            .first()
            .is_some_and(|result| result.badges.contains(&Badge::WeatherPick))
    );
}

#[rstest]
fn origin_supplies_missing_distances(mild: WeatherObservation) {
    let recommender = Recommender::new(Arc::new(sample_reference()));
    let origin = Coord {
        x: 126.9780,
        y: 37.5665,
    };
    let mut far = candidate(1, "Restaurant > Snack", 0.0).with_location(Coord {
        x: 126.9780,
        y: 37.5935,
    });
    far.distance_m = None;
    let mut near = candidate(2, "Restaurant > Snack", 0.0).with_location(Coord {
        x: 126.9780,
        y: 37.5710,
    });
    near.distance_m = None;
    let results = recommender.recommend(&RecommendationRequest {
        candidates: vec![far, near],
        weather: mild,
        preferences: UserPreference::new(),
        origin: Some(origin),
    });
    assert_eq!(ids(&results), vec![2, 1]);
    // roughly 3 km at 80 m/min
    assert_eq!(results.last().map(|result| result.eta_mins), Some(38));
}

fn single_dish_catalog(record: DishRecord) -> Arc<dyn DishCatalog> {
    Arc::new(DishIndex::from_records([record]))
}

#[rstest]
fn dish_tags_trigger_allergy_exclusion(mild: WeatherObservation) {
    let catalog = single_dish_catalog(
        DishRecord::new("haemul tang")
            .with_keys(["soup"])
            .with_tags(TagSet::from_raw(["shrimp", "crab"])),
    );
    let recommender = Recommender::new(Arc::new(sample_reference())).with_catalog(catalog);
    let results = recommender.recommend(&request(
        vec![
            candidate(1, "Restaurant > Korean > Soup", 100.0),
            candidate(2, "Restaurant > Snack", 100.0),
        ],
        mild,
        UserPreference::new().with_allergy("shellfish"),
    ));
    assert_eq!(ids(&results), vec![2]);
}

#[rstest]
fn dish_tags_trigger_dislike_demotion(mild: WeatherObservation) {
    let catalog = single_dish_catalog(
        DishRecord::new("tteokbokki")
            .with_keys(["snack"])
            .with_tags(TagSet::from_raw(["spicy"])),
    );
    let recommender = Recommender::new(Arc::new(sample_reference())).with_catalog(catalog);
    let results = recommender.recommend(&request(
        vec![
            candidate(1, "Restaurant > Snack", 100.0),
            candidate(2, "Restaurant > Korean", 100.0),
        ],
        mild,
        UserPreference::new().with_dislike("spicy"),
    ));
    assert_eq!(ids(&results), vec![2, 1]);
    let demoted = results.last().expect("two results");
    assert!(
        demoted
            .reasons
            .contains(&"contains a disliked ingredient".to_owned())
    );
}

#[rstest]
fn dish_tags_earn_weather_bonus() {
    let rainy = WeatherObservation::new(18.0).with_precipitation(PrecipitationType::Rain, 3.0);
    let snack = || {
        request(
            vec![candidate(1, "Restaurant > Snack", 100.0)],
            rainy,
            UserPreference::new(),
        )
    };
    let is_weather_pick = |results: &[RecommendationResult]| {
        results
            .first()
            .is_some_and(|result| result.badges.contains(&Badge::WeatherPick))
    };

    let plain = Recommender::new(Arc::new(sample_reference()));
    assert!(!is_weather_pick(&plain.recommend(&snack())));

    let catalog = single_dish_catalog(
        DishRecord::new("eomuk tang")
            .with_keys(["snack"])
            .with_tags(TagSet::from_raw(["soup", "warm"])),
    );
    let with_dish = Recommender::new(Arc::new(sample_reference())).with_catalog(catalog);
    let results = with_dish.recommend(&snack());
    assert!(is_weather_pick(&results));
    assert_eq!(
        results.first().and_then(|result| result.dish.clone()),
        Some("eomuk tang".to_owned())
    );
}
