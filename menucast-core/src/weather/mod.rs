//! Weather normalisation.
//!
//! Converts a raw [`WeatherObservation`] into continuous
//! [`WeatherWeights`] in `[0.0, 1.0]` and a set of discrete
//! [`WeatherFlags`]. Missing or sentinel readings never fail; they simply
//! contribute nothing.

mod flags;
mod observation;
mod weights;

pub use flags::{
    COLD_MIN_C, FEELS_COLD_C, GLOOM_FLAG_THRESHOLD, HUMID_FLAG_THRESHOLD, MUGGY_HOT_THRESHOLD,
    PRECIPITATION_FLAG_THRESHOLD, TEMPERATURE_FLAG_THRESHOLD, WIND_FLAG_THRESHOLD, WeatherFlag,
    WeatherFlags,
};
pub use observation::{PrecipitationFamily, PrecipitationType, SkyCode, WeatherObservation};
pub use weights::{
    COLD_SATURATION_C, COMFORT_C, HOT_SATURATION_C, SLEET_RAIN_ABOVE_C, WeatherWeights, clamp_unit,
};

/// Weights and flags computed once per request.
///
/// # Examples
/// ```
/// use menucast_core::{WeatherFlag, WeatherObservation, WeatherSummary};
///
/// let summary = WeatherSummary::from_observation(&WeatherObservation::new(31.0));
/// assert_eq!(summary.weights.hot, 1.0);
/// assert!(summary.flags.contains(WeatherFlag::Hot));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherSummary {
    /// Continuous weights.
    pub weights: WeatherWeights,
    /// Active flags.
    pub flags: WeatherFlags,
}

impl WeatherSummary {
    /// Normalise an observation.
    #[must_use]
    pub fn from_observation(obs: &WeatherObservation) -> Self {
        let weights = WeatherWeights::from_observation(obs);
        let flags = WeatherFlags::derive(obs, &weights);
        log::debug!(
            "normalised weather at {:?} °C into {} active flag(s)",
            obs.temperature(),
            flags.len()
        );
        Self { weights, flags }
    }
}
