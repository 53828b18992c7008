//! Behaviour coverage for the end-to-end recommender.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::{Cell, RefCell};
use std::sync::Arc;

use menucast_core::test_support::sample_reference;
use menucast_core::{
    Badge, Candidate, PrecipitationType, Recommend, RecommendationRequest, RecommendationResult,
    SkyCode, UserPreference, WeatherObservation,
};
use menucast_scorer::Recommender;

const SOUP_HOUSE: u64 = 1;
const SALAD_BAR: u64 = 2;
const SNACK_STAND: u64 = 3;
const SEAFOOD_GRILL: u64 = 4;
const FAR_SNACK_STAND: u64 = 5;

#[fixture]
fn recommender() -> Recommender {
    Recommender::new(Arc::new(sample_reference()))
}

#[fixture]
fn candidates() -> RefCell<Vec<Candidate>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn weather() -> Cell<WeatherObservation> {
    Cell::new(WeatherObservation::default())
}

#[fixture]
fn preferences() -> RefCell<UserPreference> {
    RefCell::new(UserPreference::new())
}

#[fixture]
fn results() -> RefCell<Vec<RecommendationResult>> {
    RefCell::new(Vec::new())
}

fn soup_house() -> Candidate {
    Candidate::new(SOUP_HOUSE, "Soup House", "Restaurant > Korean > Soup", 300.0)
}

#[given("a soup house, a salad bar and a snack stand at the same distance")]
fn given_three_kitchens(#[from(candidates)] candidates: &RefCell<Vec<Candidate>>) {
    *candidates.borrow_mut() = vec![
        Candidate::new(SNACK_STAND, "Snack Stand", "Restaurant > Snack", 300.0),
        Candidate::new(SALAD_BAR, "Salad Bar", "Restaurant > Western > Salad", 300.0),
        soup_house(),
    ];
}

#[given("a seafood grill and a soup house at the same distance")]
fn given_seafood(#[from(candidates)] candidates: &RefCell<Vec<Candidate>>) {
    *candidates.borrow_mut() = vec![
        Candidate::new(SEAFOOD_GRILL, "Seafood Grill", "Restaurant > Seafood", 300.0),
        soup_house(),
    ];
}

#[given("two snack stands at 100 m and 1200 m")]
fn given_two_snack_stands(#[from(candidates)] candidates: &RefCell<Vec<Candidate>>) {
    *candidates.borrow_mut() = vec![
        Candidate::new(FAR_SNACK_STAND, "Far Snacks", "Restaurant > Snack", 1200.0),
        Candidate::new(SNACK_STAND, "Near Snacks", "Restaurant > Snack", 100.0),
    ];
}

#[given("no candidates")]
fn given_no_candidates(#[from(candidates)] candidates: &RefCell<Vec<Candidate>>) {
    candidates.borrow_mut().clear();
}

#[given("a cold rainy observation")]
fn given_cold_rain(#[from(weather)] weather: &Cell<WeatherObservation>) {
    weather.set(
        WeatherObservation::new(5.0)
            .with_humidity(85.0)
            .with_precipitation(PrecipitationType::Rain, 2.5),
    );
}

#[given("a humid heatwave observation")]
fn given_heatwave(#[from(weather)] weather: &Cell<WeatherObservation>) {
    weather.set(
        WeatherObservation::new(31.0)
            .with_humidity(92.0)
            .with_sky(SkyCode::Clear),
    );
}

#[given("a mild observation")]
fn given_mild(#[from(weather)] weather: &Cell<WeatherObservation>) {
    weather.set(WeatherObservation::new(22.0));
}

#[given("the user is allergic to shellfish")]
fn given_shellfish_allergy(#[from(preferences)] preferences: &RefCell<UserPreference>) {
    *preferences.borrow_mut() = UserPreference::new().with_allergy("shellfish");
}

#[when("I request recommendations")]
fn when_recommend(
    #[from(recommender)] recommender: &Recommender,
    #[from(candidates)] candidates: &RefCell<Vec<Candidate>>,
    #[from(weather)] weather: &Cell<WeatherObservation>,
    #[from(preferences)] preferences: &RefCell<UserPreference>,
    #[from(results)] results: &RefCell<Vec<RecommendationResult>>,
) {
    let request = RecommendationRequest {
        candidates: candidates.borrow().clone(),
        weather: weather.get(),
        preferences: preferences.borrow().clone(),
        origin: None,
    };
    *results.borrow_mut() = recommender.recommend(&request);
}

fn first_id(results: &RefCell<Vec<RecommendationResult>>) -> Option<u64> {
    results.borrow().first().map(|result| result.candidate_id)
}

#[then("the soup house is ranked first")]
fn then_soup_first(#[from(results)] results: &RefCell<Vec<RecommendationResult>>) {
    assert_eq!(first_id(results), Some(SOUP_HOUSE));
}

#[then("the soup house carries the exact match and weather pick badges")]
fn then_soup_badges(#[from(results)] results: &RefCell<Vec<RecommendationResult>>) {
    let results = results.borrow();
    let soup = results
        .iter()
        .find(|result| result.candidate_id == SOUP_HOUSE);
    assert!(soup.is_some_and(|result| {
        result.badges.contains(&Badge::ExactMatch) && result.badges.contains(&Badge::WeatherPick)
    }));
}

#[then("the salad bar is ranked first")]
fn then_salad_first(#[from(results)] results: &RefCell<Vec<RecommendationResult>>) {
    assert_eq!(first_id(results), Some(SALAD_BAR));
}

#[then("the seafood grill is not recommended")]
fn then_no_seafood(#[from(results)] results: &RefCell<Vec<RecommendationResult>>) {
    let results = results.borrow();
    assert!(
        results
            .iter()
            .all(|result| result.candidate_id != SEAFOOD_GRILL)
    );
    assert_eq!(results.len(), 1);
}

#[then("the nearby snack stand is ranked first")]
fn then_nearby_first(#[from(results)] results: &RefCell<Vec<RecommendationResult>>) {
    assert_eq!(first_id(results), Some(SNACK_STAND));
}

#[then("no recommendation is returned")]
fn then_empty(#[from(results)] results: &RefCell<Vec<RecommendationResult>>) {
    assert!(results.borrow().is_empty());
}

#[scenario(path = "tests/features/recommender.feature", index = 0)]
fn soup_leads_on_cold_rainy_day(
    recommender: Recommender,
    candidates: RefCell<Vec<Candidate>>,
    weather: Cell<WeatherObservation>,
    preferences: RefCell<UserPreference>,
    results: RefCell<Vec<RecommendationResult>>,
) {
    let _ = (recommender, candidates, weather, preferences, results);
}

#[scenario(path = "tests/features/recommender.feature", index = 1)]
fn salad_leads_on_humid_heatwave(
    recommender: Recommender,
    candidates: RefCell<Vec<Candidate>>,
    weather: Cell<WeatherObservation>,
    preferences: RefCell<UserPreference>,
    results: RefCell<Vec<RecommendationResult>>,
) {
    let _ = (recommender, candidates, weather, preferences, results);
}

#[scenario(path = "tests/features/recommender.feature", index = 2)]
fn shellfish_allergy_removes_seafood(
    recommender: Recommender,
    candidates: RefCell<Vec<Candidate>>,
    weather: Cell<WeatherObservation>,
    preferences: RefCell<UserPreference>,
    results: RefCell<Vec<RecommendationResult>>,
) {
    let _ = (recommender, candidates, weather, preferences, results);
}

#[scenario(path = "tests/features/recommender.feature", index = 3)]
fn nearby_outranks_distant_twin(
    recommender: Recommender,
    candidates: RefCell<Vec<Candidate>>,
    weather: Cell<WeatherObservation>,
    preferences: RefCell<UserPreference>,
    results: RefCell<Vec<RecommendationResult>>,
) {
    let _ = (recommender, candidates, weather, preferences, results);
}

#[scenario(path = "tests/features/recommender.feature", index = 4)]
fn no_candidates_no_recommendations(
    recommender: Recommender,
    candidates: RefCell<Vec<Candidate>>,
    weather: Cell<WeatherObservation>,
    preferences: RefCell<UserPreference>,
    results: RefCell<Vec<RecommendationResult>>,
) {
    let _ = (recommender, candidates, weather, preferences, results);
}
