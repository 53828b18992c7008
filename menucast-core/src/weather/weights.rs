//! Continuous per-phenomenon weather weights.

use super::observation::{PrecipitationFamily, SkyCode, WeatherObservation};

/// Temperature at or below which `cold` saturates.
pub const COLD_SATURATION_C: f64 = 10.0;
/// Temperature at which the cold and hot ramps both reach zero.
pub const COMFORT_C: f64 = 22.0;
/// Temperature at or above which `hot` saturates.
pub const HOT_SATURATION_C: f64 = 28.0;
/// Sleet above this temperature is banded as rain.
pub const SLEET_RAIN_ABOVE_C: f64 = 1.0;

/// Seven independent weather weights in `[0.0, 1.0]`.
///
/// Every field is a pure function of a [`WeatherObservation`] and is
/// monotonic in its driving variable.
///
/// # Examples
/// ```
/// use menucast_core::{PrecipitationType, WeatherObservation, WeatherWeights};
///
/// let obs = WeatherObservation::new(5.0)
///     .with_humidity(85.0)
///     .with_precipitation(PrecipitationType::Rain, 2.5);
/// let weights = WeatherWeights::from_observation(&obs);
///
/// assert_eq!(weights.cold, 1.0);
/// assert_eq!(weights.rain, 0.8);
/// assert_eq!(weights.snow, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherWeights {
    /// Rises as temperature falls below 22 °C, saturating at 10 °C.
    pub cold: f64,
    /// Rises as temperature climbs above 22 °C, saturating at 28 °C.
    pub hot: f64,
    /// Cloud cover.
    pub gloom: f64,
    /// Rainfall intensity band.
    pub rain: f64,
    /// Snowfall intensity band.
    pub snow: f64,
    /// Humidity above 60 %, saturating at 90 %.
    pub humid: f64,
    /// Wind speed band.
    pub wind: f64,
}

impl WeatherWeights {
    /// Derive weights from an observation. Absent values contribute `0.0`.
    #[must_use]
    pub fn from_observation(obs: &WeatherObservation) -> Self {
        let temperature = obs.temperature();
        let (rain, snow) = precipitation_weights(obs);
        Self {
            cold: clamp_unit(temperature.map_or(0.0, cold_weight)),
            hot: clamp_unit(temperature.map_or(0.0, hot_weight)),
            gloom: clamp_unit(gloom_weight(obs.sky)),
            rain: clamp_unit(rain),
            snow: clamp_unit(snow),
            humid: clamp_unit(obs.humidity().map_or(0.0, humid_weight)),
            wind: clamp_unit(obs.wind().map_or(0.0, wind_weight)),
        }
    }

    /// Fields as `(name, value)` pairs in declaration order.
    #[must_use]
    pub const fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("cold", self.cold),
            ("hot", self.hot),
            ("gloom", self.gloom),
            ("rain", self.rain),
            ("snow", self.snow),
            ("humid", self.humid),
            ("wind", self.wind),
        ]
    }
}

/// Clamp into `[0.0, 1.0]`, mapping non-finite values to `0.0`.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "linear ramp between the comfort and saturation temperatures"
)]
fn cold_weight(temperature: f64) -> f64 {
    if temperature <= COLD_SATURATION_C {
        1.0
    } else if temperature < COMFORT_C {
        (COMFORT_C - temperature) / (COMFORT_C - COLD_SATURATION_C)
    } else {
        0.0
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "linear ramp between the comfort and saturation temperatures"
)]
fn hot_weight(temperature: f64) -> f64 {
    if temperature >= HOT_SATURATION_C {
        1.0
    } else if temperature >= COMFORT_C {
        (temperature - COMFORT_C) / (HOT_SATURATION_C - COMFORT_C)
    } else {
        0.0
    }
}

const fn gloom_weight(sky: SkyCode) -> f64 {
    match sky {
        SkyCode::Overcast => 1.0,
        SkyCode::MostlyCloudy => 0.5,
        SkyCode::Clear | SkyCode::Unknown => 0.0,
    }
}

fn precipitation_weights(obs: &WeatherObservation) -> (f64, f64) {
    let rain_amount = obs.precipitation_amount().unwrap_or(0.0);
    // Snowfall is often unreported; fall back to the liquid amount, which is
    // roughly one centimetre of snow per millimetre of water.
    let snow_amount = obs.snowfall().unwrap_or(rain_amount);
    match obs.precipitation.family() {
        PrecipitationFamily::Dry => (0.0, 0.0),
        PrecipitationFamily::RainLike => (rain_band(rain_amount), 0.0),
        PrecipitationFamily::SnowLike => (0.0, snow_band(snow_amount)),
        PrecipitationFamily::Mixed => {
            if obs
                .temperature()
                .is_some_and(|temperature| temperature > SLEET_RAIN_ABOVE_C)
            {
                (rain_band(rain_amount), 0.0)
            } else {
                (0.0, snow_band(snow_amount))
            }
        }
    }
}

fn rain_band(amount_mm: f64) -> f64 {
    if amount_mm < 1.0 {
        0.4
    } else if amount_mm <= 5.0 {
        0.8
    } else {
        1.0
    }
}

fn snow_band(amount_cm: f64) -> f64 {
    if amount_cm < 0.5 {
        0.4
    } else if amount_cm <= 2.0 {
        0.8
    } else {
        1.0
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "linear ramp between 60 % and 90 % humidity"
)]
fn humid_weight(humidity: f64) -> f64 {
    if humidity < 60.0 {
        0.0
    } else if humidity <= 90.0 {
        (humidity - 60.0) / 30.0
    } else {
        1.0
    }
}

fn wind_weight(wind_ms: f64) -> f64 {
    if wind_ms < 4.0 {
        0.0
    } else if wind_ms < 9.0 {
        0.3
    } else if wind_ms <= 14.0 {
        0.7
    } else {
        1.0
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floats within a tolerance"
)]
mod tests {
    use super::*;
    use crate::PrecipitationType;
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-9;

    #[rstest]
    #[case(-5.0, 1.0)]
    #[case(10.0, 1.0)]
    #[case(16.0, 0.5)]
    #[case(22.0, 0.0)]
    #[case(30.0, 0.0)]
    fn cold_ramp(#[case] temperature: f64, #[case] expected: f64) {
        let weights = WeatherWeights::from_observation(&WeatherObservation::new(temperature));
        assert!((weights.cold - expected).abs() < TOLERANCE);
    }

    #[rstest]
    #[case(21.9, 0.0)]
    #[case(22.0, 0.0)]
    #[case(25.0, 0.5)]
    #[case(28.0, 1.0)]
    #[case(35.0, 1.0)]
    fn hot_ramp(#[case] temperature: f64, #[case] expected: f64) {
        let weights = WeatherWeights::from_observation(&WeatherObservation::new(temperature));
        assert!((weights.hot - expected).abs() < TOLERANCE);
    }

    #[rstest]
    #[case(PrecipitationType::Rain, 0.0, 0.4, 0.0)]
    #[case(PrecipitationType::Rain, 0.9, 0.4, 0.0)]
    #[case(PrecipitationType::Rain, 1.0, 0.8, 0.0)]
    #[case(PrecipitationType::Drizzle, 5.0, 0.8, 0.0)]
    #[case(PrecipitationType::Rain, 5.1, 1.0, 0.0)]
    #[case(PrecipitationType::Snow, 0.2, 0.0, 0.4)]
    #[case(PrecipitationType::SnowFlurry, 2.0, 0.0, 0.8)]
    #[case(PrecipitationType::Snow, 3.0, 0.0, 1.0)]
    #[case(PrecipitationType::None, 12.0, 0.0, 0.0)]
    fn precipitation_banding(
        #[case] kind: PrecipitationType,
        #[case] amount: f64,
        #[case] rain: f64,
        #[case] snow: f64,
    ) {
        let obs = WeatherObservation::new(5.0).with_precipitation(kind, amount);
        let weights = WeatherWeights::from_observation(&obs);
        assert!((weights.rain - rain).abs() < TOLERANCE);
        assert!((weights.snow - snow).abs() < TOLERANCE);
    }

    #[rstest]
    #[case(3.0, 0.8, 0.0)]
    #[case(1.0, 0.0, 0.8)]
    #[case(-2.0, 0.0, 0.8)]
    fn sleet_routes_by_temperature(#[case] temperature: f64, #[case] rain: f64, #[case] snow: f64) {
        let obs = WeatherObservation::new(temperature)
            .with_precipitation(PrecipitationType::Sleet, 1.5);
        let weights = WeatherWeights::from_observation(&obs);
        assert!((weights.rain - rain).abs() < TOLERANCE);
        assert!((weights.snow - snow).abs() < TOLERANCE);
    }

    #[test]
    fn reported_snowfall_takes_precedence() {
        let obs = WeatherObservation::new(-1.0)
            .with_precipitation(PrecipitationType::Snow, 0.1)
            .with_snowfall(2.5);
        let weights = WeatherWeights::from_observation(&obs);
        assert!((weights.snow - 1.0).abs() < TOLERANCE);
    }

    #[rstest]
    #[case(59.9, 0.0)]
    #[case(75.0, 0.5)]
    #[case(90.0, 1.0)]
    #[case(99.0, 1.0)]
    #[case(150.0, 0.0)]
    fn humidity_ramp(#[case] humidity: f64, #[case] expected: f64) {
        let obs = WeatherObservation::new(20.0).with_humidity(humidity);
        let weights = WeatherWeights::from_observation(&obs);
        assert!((weights.humid - expected).abs() < TOLERANCE);
    }

    #[rstest]
    #[case(3.9, 0.0)]
    #[case(4.0, 0.3)]
    #[case(9.0, 0.7)]
    #[case(14.0, 0.7)]
    #[case(14.1, 1.0)]
    #[case(-4.0, 0.0)]
    fn wind_bands(#[case] wind: f64, #[case] expected: f64) {
        let obs = WeatherObservation::new(20.0).with_wind(wind);
        let weights = WeatherWeights::from_observation(&obs);
        assert!((weights.wind - expected).abs() < TOLERANCE);
    }

    #[rstest]
    #[case(SkyCode::Clear, 0.0)]
    #[case(SkyCode::MostlyCloudy, 0.5)]
    #[case(SkyCode::Overcast, 1.0)]
    #[case(SkyCode::Unknown, 0.0)]
    fn gloom_follows_sky(#[case] sky: SkyCode, #[case] expected: f64) {
        let obs = WeatherObservation::new(20.0).with_sky(sky);
        let weights = WeatherWeights::from_observation(&obs);
        assert!((weights.gloom - expected).abs() < TOLERANCE);
    }

    #[test]
    fn absent_temperature_contributes_nothing() {
        let weights = WeatherWeights::from_observation(&WeatherObservation::new(f64::NAN));
        assert!(weights.cold.abs() < TOLERANCE);
        assert!(weights.hot.abs() < TOLERANCE);
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(-0.5)]
    fn clamp_unit_is_total(#[case] value: f64) {
        let clamped = clamp_unit(value);
        assert!((0.0..=1.0).contains(&clamped));
    }
}
