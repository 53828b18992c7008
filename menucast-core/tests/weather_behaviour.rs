//! Behaviour coverage for weather normalisation.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::{Cell, RefCell};

use menucast_core::{
    PrecipitationType, SkyCode, WeatherFlag, WeatherObservation, WeatherSummary,
};

const TOLERANCE: f64 = 1e-9;

#[fixture]
fn observation() -> Cell<WeatherObservation> {
    Cell::new(WeatherObservation::default())
}

#[fixture]
fn summary() -> RefCell<WeatherSummary> {
    RefCell::new(WeatherSummary::default())
}

#[given("an observation of 5 degrees, 85 percent humidity and 2.5 mm of rain")]
fn given_cold_rain(#[from(observation)] observation: &Cell<WeatherObservation>) {
    observation.set(
        WeatherObservation::new(5.0)
            .with_humidity(85.0)
            .with_precipitation(PrecipitationType::Rain, 2.5),
    );
}

#[given("an observation of 31 degrees and 92 percent humidity under a clear sky")]
fn given_heatwave(#[from(observation)] observation: &Cell<WeatherObservation>) {
    observation.set(
        WeatherObservation::new(31.0)
            .with_humidity(92.0)
            .with_sky(SkyCode::Clear),
    );
}

#[given("an observation with no usable readings")]
fn given_missing(#[from(observation)] observation: &Cell<WeatherObservation>) {
    observation.set(
        WeatherObservation::new(f64::NAN)
            .with_humidity(-5.0)
            .with_wind(f64::INFINITY),
    );
}

#[when("I normalise the weather")]
fn when_normalise(
    #[from(observation)] observation: &Cell<WeatherObservation>,
    #[from(summary)] summary: &RefCell<WeatherSummary>,
) {
    *summary.borrow_mut() = WeatherSummary::from_observation(&observation.get());
}

#[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < TOLERANCE
}

#[then("the cold weight is 1.0")]
fn then_cold_saturated(#[from(summary)] summary: &RefCell<WeatherSummary>) {
    assert!(close(summary.borrow().weights.cold, 1.0));
}

#[then("the rain weight is 0.8")]
fn then_moderate_rain(#[from(summary)] summary: &RefCell<WeatherSummary>) {
    assert!(close(summary.borrow().weights.rain, 0.8));
}

#[then("the hot weight is 1.0")]
fn then_hot_saturated(#[from(summary)] summary: &RefCell<WeatherSummary>) {
    assert!(close(summary.borrow().weights.hot, 1.0));
}

#[then("the flags include cold and rain")]
fn then_cold_rain_flags(#[from(summary)] summary: &RefCell<WeatherSummary>) {
    let flags = &summary.borrow().flags;
    assert!(flags.contains(WeatherFlag::Cold));
    assert!(flags.contains(WeatherFlag::Rain));
    assert!(flags.contains(WeatherFlag::Wet));
}

#[then("the flags include hot and muggy")]
fn then_hot_muggy_flags(#[from(summary)] summary: &RefCell<WeatherSummary>) {
    let flags = &summary.borrow().flags;
    assert!(flags.contains(WeatherFlag::Hot));
    assert!(flags.contains(WeatherFlag::Muggy));
    assert!(flags.contains(WeatherFlag::Clear));
}

#[then("every weight is zero")]
fn then_all_zero(#[from(summary)] summary: &RefCell<WeatherSummary>) {
    for (name, value) in summary.borrow().weights.fields() {
        assert!(close(value, 0.0), "{name} should be zero, got {value}");
    }
}

#[then("no flag is raised")]
fn then_no_flags(#[from(summary)] summary: &RefCell<WeatherSummary>) {
    assert!(summary.borrow().flags.is_empty());
}

#[scenario(path = "tests/features/weather.feature", index = 0)]
fn cold_rainy_afternoon(observation: Cell<WeatherObservation>, summary: RefCell<WeatherSummary>) {
    let _ = (observation, summary);
}

#[scenario(path = "tests/features/weather.feature", index = 1)]
fn humid_heatwave(observation: Cell<WeatherObservation>, summary: RefCell<WeatherSummary>) {
    let _ = (observation, summary);
}

#[scenario(path = "tests/features/weather.feature", index = 2)]
fn missing_readings(observation: Cell<WeatherObservation>, summary: RefCell<WeatherSummary>) {
    let _ = (observation, summary);
}
