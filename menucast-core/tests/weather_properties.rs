//! Property tests for weather normalisation.

use menucast_core::{
    PrecipitationType, SkyCode, WeatherFlag, WeatherFlags, WeatherObservation, WeatherWeights,
};
use proptest::prelude::*;

fn precipitation_type() -> impl Strategy<Value = PrecipitationType> {
    prop_oneof![
        Just(PrecipitationType::None),
        Just(PrecipitationType::Rain),
        Just(PrecipitationType::Sleet),
        Just(PrecipitationType::Snow),
        Just(PrecipitationType::Drizzle),
        Just(PrecipitationType::DrizzleSleet),
        Just(PrecipitationType::SnowFlurry),
    ]
}

fn sky_code() -> impl Strategy<Value = SkyCode> {
    prop_oneof![
        Just(SkyCode::Clear),
        Just(SkyCode::MostlyCloudy),
        Just(SkyCode::Overcast),
        Just(SkyCode::Unknown),
    ]
}

fn reading() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => -200.0_f64..200.0,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

prop_compose! {
    fn observation()(
        temperature in reading(),
        humidity in reading(),
        wind in reading(),
        sky in sky_code(),
        kind in precipitation_type(),
        amount in reading(),
        snowfall in proptest::option::of(reading()),
        daily_min in proptest::option::of(reading()),
    ) -> WeatherObservation {
        let mut obs = WeatherObservation::new(temperature)
            .with_humidity(humidity)
            .with_wind(wind)
            .with_sky(sky)
            .with_precipitation(kind, amount);
        if let Some(value) = snowfall {
            obs = obs.with_snowfall(value);
        }
        if let Some(value) = daily_min {
            obs = obs.with_daily_min(value);
        }
        obs
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn weights_stay_in_unit_interval(obs in observation()) {
        let weights = WeatherWeights::from_observation(&obs);
        for (name, value) in weights.fields() {
            prop_assert!(value.is_finite(), "{name} is not finite");
            prop_assert!((0.0..=1.0).contains(&value), "{name} = {value} is out of range");
        }
    }

    #[test]
    fn cold_never_rises_with_temperature(low in -60.0_f64..60.0, delta in 0.0_f64..30.0) {
        #[expect(clippy::float_arithmetic, reason = "derive a warmer reading")]
        let high = (low + delta).min(60.0);
        let cold_low = WeatherWeights::from_observation(&WeatherObservation::new(low)).cold;
        let cold_high = WeatherWeights::from_observation(&WeatherObservation::new(high)).cold;
        prop_assert!(cold_high <= cold_low);
    }

    #[test]
    fn hot_never_falls_with_temperature(low in -60.0_f64..60.0, delta in 0.0_f64..30.0) {
        #[expect(clippy::float_arithmetic, reason = "derive a warmer reading")]
        let high = (low + delta).min(60.0);
        let hot_low = WeatherWeights::from_observation(&WeatherObservation::new(low)).hot;
        let hot_high = WeatherWeights::from_observation(&WeatherObservation::new(high)).hot;
        prop_assert!(hot_high >= hot_low);
    }

    #[test]
    fn rain_never_falls_with_amount(low in 0.0_f64..20.0, delta in 0.0_f64..20.0) {
        #[expect(clippy::float_arithmetic, reason = "derive a heavier reading")]
        let high = low + delta;
        let rain = |amount| {
            WeatherWeights::from_observation(
                &WeatherObservation::new(15.0).with_precipitation(PrecipitationType::Rain, amount),
            )
            .rain
        };
        prop_assert!(rain(high) >= rain(low));
    }

    #[test]
    fn flags_agree_with_weights(obs in observation()) {
        let weights = WeatherWeights::from_observation(&obs);
        let flags = WeatherFlags::derive(&obs, &weights);
        prop_assert_eq!(flags.contains(WeatherFlag::Cold), weights.cold >= 0.5);
        prop_assert_eq!(flags.contains(WeatherFlag::Hot), weights.hot >= 0.5);
        prop_assert_eq!(flags.contains(WeatherFlag::Rain), weights.rain >= 0.3);
        prop_assert_eq!(flags.contains(WeatherFlag::Snow), weights.snow >= 0.3);
        prop_assert_eq!(
            flags.contains(WeatherFlag::Wet),
            flags.contains(WeatherFlag::Rain) || flags.contains(WeatherFlag::Snow)
        );
        if flags.contains(WeatherFlag::Muggy) {
            prop_assert!(flags.contains(WeatherFlag::Humid));
        }
    }
}
