//! Discrete weather flags derived from weights and raw readings.

use std::collections::BTreeSet;
use std::fmt;

use super::observation::{SkyCode, WeatherObservation};
use super::weights::{COLD_SATURATION_C, HOT_SATURATION_C, WeatherWeights};

/// Weight at or above which `Cold` and `Hot` are raised.
pub const TEMPERATURE_FLAG_THRESHOLD: f64 = 0.5;
/// Weight at or above which `Rain` and `Snow` are raised.
pub const PRECIPITATION_FLAG_THRESHOLD: f64 = 0.3;
/// Weight at or above which `Humid` is raised.
pub const HUMID_FLAG_THRESHOLD: f64 = 0.5;
/// Weight at or above which `Windy` is raised.
pub const WIND_FLAG_THRESHOLD: f64 = 0.3;
/// Weight at or above which `Gloomy` is raised.
pub const GLOOM_FLAG_THRESHOLD: f64 = 0.5;
/// Hot weight at or above which a humid day counts as muggy.
pub const MUGGY_HOT_THRESHOLD: f64 = 0.3;
/// Apparent temperature at or below which `FeelsCold` is raised.
pub const FEELS_COLD_C: f64 = 10.0;
/// Daily minimum at or below which `ColdMin` is raised.
pub const COLD_MIN_C: f64 = 5.0;

/// A discrete weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeatherFlag {
    /// Cold weight ≥ 0.5 or temperature ≤ 10 °C.
    Cold,
    /// Hot weight ≥ 0.5 or temperature ≥ 28 °C.
    Hot,
    /// Gloom weight ≥ 0.5.
    Gloomy,
    /// Rain weight ≥ 0.3.
    Rain,
    /// Snow weight ≥ 0.3.
    Snow,
    /// Humid weight ≥ 0.5.
    Humid,
    /// Wind weight ≥ 0.3.
    Windy,
    /// Rain or snow.
    Wet,
    /// Apparent temperature ≤ 10 °C.
    FeelsCold,
    /// Daily minimum ≤ 5 °C.
    ColdMin,
    /// Humid and at least mildly hot.
    Muggy,
    /// Clear sky with nothing falling.
    Clear,
}

impl WeatherFlag {
    /// Lowercase label used in reasons and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Hot => "hot",
            Self::Gloomy => "gloomy",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Humid => "humid",
            Self::Windy => "windy",
            Self::Wet => "wet",
            Self::FeelsCold => "feels cold",
            Self::ColdMin => "cold morning",
            Self::Muggy => "muggy",
            Self::Clear => "clear",
        }
    }
}

impl fmt::Display for WeatherFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of active weather flags, iterated in declaration order.
///
/// # Examples
/// ```
/// use menucast_core::{PrecipitationType, WeatherFlag, WeatherFlags, WeatherObservation};
///
/// let obs = WeatherObservation::new(5.0)
///     .with_humidity(85.0)
///     .with_precipitation(PrecipitationType::Rain, 2.5);
/// let flags = WeatherFlags::from_observation(&obs);
///
/// assert!(flags.contains(WeatherFlag::Cold));
/// assert!(flags.contains(WeatherFlag::Rain));
/// assert!(flags.contains(WeatherFlag::Wet));
/// assert!(!flags.contains(WeatherFlag::Hot));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WeatherFlags {
    flags: BTreeSet<WeatherFlag>,
}

impl WeatherFlags {
    /// Derive flags directly from an observation.
    #[must_use]
    pub fn from_observation(obs: &WeatherObservation) -> Self {
        Self::derive(obs, &WeatherWeights::from_observation(obs))
    }

    /// Derive flags from an observation and its pre-computed weights.
    ///
    /// Raw-value shortcuts agree with the weight thresholds: a temperature at
    /// or below 10 °C always has a cold weight of `1.0`, so both paths raise
    /// `Cold` together.
    #[must_use]
    pub fn derive(obs: &WeatherObservation, weights: &WeatherWeights) -> Self {
        let temperature = obs.temperature();
        let mut flags = BTreeSet::new();

        if weights.cold >= TEMPERATURE_FLAG_THRESHOLD
            || temperature.is_some_and(|t| t <= COLD_SATURATION_C)
        {
            flags.insert(WeatherFlag::Cold);
        }
        if weights.hot >= TEMPERATURE_FLAG_THRESHOLD
            || temperature.is_some_and(|t| t >= HOT_SATURATION_C)
        {
            flags.insert(WeatherFlag::Hot);
        }
        if weights.gloom >= GLOOM_FLAG_THRESHOLD {
            flags.insert(WeatherFlag::Gloomy);
        }
        let rain = weights.rain >= PRECIPITATION_FLAG_THRESHOLD;
        let snow = weights.snow >= PRECIPITATION_FLAG_THRESHOLD;
        if rain {
            flags.insert(WeatherFlag::Rain);
        }
        if snow {
            flags.insert(WeatherFlag::Snow);
        }
        if rain || snow {
            flags.insert(WeatherFlag::Wet);
        }
        let humid = weights.humid >= HUMID_FLAG_THRESHOLD;
        if humid {
            flags.insert(WeatherFlag::Humid);
        }
        if weights.wind >= WIND_FLAG_THRESHOLD {
            flags.insert(WeatherFlag::Windy);
        }
        if obs
            .apparent_temperature()
            .is_some_and(|t| t <= FEELS_COLD_C)
        {
            flags.insert(WeatherFlag::FeelsCold);
        }
        if obs.daily_min().is_some_and(|t| t <= COLD_MIN_C) {
            flags.insert(WeatherFlag::ColdMin);
        }
        if humid && weights.hot >= MUGGY_HOT_THRESHOLD {
            flags.insert(WeatherFlag::Muggy);
        }
        if obs.sky == SkyCode::Clear && weights.rain <= 0.0 && weights.snow <= 0.0 {
            flags.insert(WeatherFlag::Clear);
        }

        Self { flags }
    }

    /// Report whether `flag` is active.
    #[must_use]
    pub fn contains(&self, flag: WeatherFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Report whether any of `flags` is active.
    #[must_use]
    pub fn contains_any(&self, flags: &[WeatherFlag]) -> bool {
        flags.iter().any(|flag| self.contains(*flag))
    }

    /// Iterate over active flags.
    pub fn iter(&self) -> impl Iterator<Item = WeatherFlag> + '_ {
        self.flags.iter().copied()
    }

    /// Number of active flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Report whether no flag is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FromIterator<WeatherFlag> for WeatherFlags {
    fn from_iter<I: IntoIterator<Item = WeatherFlag>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}
