//! Raw weather observations as supplied by a weather adapter.

/// Plausible air temperature range in °C; anything outside is a sentinel.
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=60.0;
/// Valid relative humidity range in percent.
const HUMIDITY_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// Sky condition code.
///
/// Codes follow the short-term forecast convention: `1` clear, `3` mostly
/// cloudy, `4` overcast. Any other code is [`SkyCode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkyCode {
    /// Clear sky (`1`).
    Clear,
    /// Mostly cloudy (`3`).
    MostlyCloudy,
    /// Overcast (`4`).
    Overcast,
    /// Missing or unrecognised code.
    #[default]
    Unknown,
}

impl SkyCode {
    /// Map a numeric sky code, treating unknown codes as absent.
    ///
    /// # Examples
    /// ```
    /// use menucast_core::SkyCode;
    ///
    /// assert_eq!(SkyCode::from_code(4), SkyCode::Overcast);
    /// assert_eq!(SkyCode::from_code(2), SkyCode::Unknown);
    /// ```
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Clear,
            3 => Self::MostlyCloudy,
            4 => Self::Overcast,
            _ => Self::Unknown,
        }
    }
}

/// Precipitation type.
///
/// Numeric codes follow the short-term forecast `PTY` convention:
/// `0` none, `1` rain, `2` rain/snow, `3` snow, `5` drizzle,
/// `6` drizzle/snow flurry, `7` snow flurry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrecipitationType {
    /// No precipitation.
    #[default]
    None,
    /// Rain.
    Rain,
    /// Mixed rain and snow.
    Sleet,
    /// Snow.
    Snow,
    /// Light drizzle.
    Drizzle,
    /// Drizzle mixed with snow flurries.
    DrizzleSleet,
    /// Light snow flurries.
    SnowFlurry,
}

/// Banding family a precipitation type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationFamily {
    /// Nothing falling.
    Dry,
    /// Banded on rainfall amount.
    RainLike,
    /// Banded on snowfall amount.
    SnowLike,
    /// Rain banding above 1 °C, snow banding otherwise.
    Mixed,
}

impl PrecipitationType {
    /// Map a numeric `PTY` code. Unknown codes are treated as no precipitation.
    ///
    /// # Examples
    /// ```
    /// use menucast_core::PrecipitationType;
    ///
    /// assert_eq!(PrecipitationType::from_code(2), PrecipitationType::Sleet);
    /// assert_eq!(PrecipitationType::from_code(4), PrecipitationType::None);
    /// ```
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Rain,
            2 => Self::Sleet,
            3 => Self::Snow,
            5 => Self::Drizzle,
            6 => Self::DrizzleSleet,
            7 => Self::SnowFlurry,
            _ => Self::None,
        }
    }

    /// The banding family used by the normaliser.
    #[must_use]
    pub const fn family(self) -> PrecipitationFamily {
        match self {
            Self::None => PrecipitationFamily::Dry,
            Self::Rain | Self::Drizzle => PrecipitationFamily::RainLike,
            Self::Snow | Self::SnowFlurry => PrecipitationFamily::SnowLike,
            Self::Sleet | Self::DrizzleSleet => PrecipitationFamily::Mixed,
        }
    }
}

/// A single weather observation.
///
/// Values outside their physical range (and non-finite values) are treated
/// as absent by the accessor methods; the raw fields are kept as supplied.
///
/// # Examples
/// ```
/// use menucast_core::{PrecipitationType, SkyCode, WeatherObservation};
///
/// let obs = WeatherObservation::new(5.0)
///     .with_humidity(85.0)
///     .with_precipitation(PrecipitationType::Rain, 2.5)
///     .with_sky(SkyCode::Overcast);
/// assert_eq!(obs.temperature(), Some(5.0));
/// assert_eq!(obs.precipitation_amount(), Some(2.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherObservation {
    /// Air temperature in °C.
    pub temperature_c: f64,
    /// Relative humidity in percent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub humidity_pct: f64,
    /// Wind speed in m/s.
    #[cfg_attr(feature = "serde", serde(default))]
    pub wind_ms: f64,
    /// Sky condition.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sky: SkyCode,
    /// Precipitation type.
    #[cfg_attr(feature = "serde", serde(default))]
    pub precipitation: PrecipitationType,
    /// Precipitation amount in mm/h.
    #[cfg_attr(feature = "serde", serde(default))]
    pub precipitation_mm: f64,
    /// Snowfall in cm/h, when reported separately.
    #[cfg_attr(feature = "serde", serde(default))]
    pub snowfall_cm: Option<f64>,
    /// Forecast daily minimum temperature in °C.
    #[cfg_attr(feature = "serde", serde(default))]
    pub daily_min_c: Option<f64>,
}

impl Default for WeatherObservation {
    fn default() -> Self {
        Self::new(f64::NAN)
    }
}

impl WeatherObservation {
    /// Dry, calm observation at `temperature_c` with an unknown sky.
    #[must_use]
    pub const fn new(temperature_c: f64) -> Self {
        Self {
            temperature_c,
            humidity_pct: 0.0,
            wind_ms: 0.0,
            sky: SkyCode::Unknown,
            precipitation: PrecipitationType::None,
            precipitation_mm: 0.0,
            snowfall_cm: None,
            daily_min_c: None,
        }
    }

    /// Set relative humidity.
    #[must_use]
    pub const fn with_humidity(mut self, humidity_pct: f64) -> Self {
        self.humidity_pct = humidity_pct;
        self
    }

    /// Set wind speed.
    #[must_use]
    pub const fn with_wind(mut self, wind_ms: f64) -> Self {
        self.wind_ms = wind_ms;
        self
    }

    /// Set the sky code.
    #[must_use]
    pub const fn with_sky(mut self, sky: SkyCode) -> Self {
        self.sky = sky;
        self
    }

    /// Set precipitation type and amount.
    #[must_use]
    pub const fn with_precipitation(mut self, kind: PrecipitationType, amount_mm: f64) -> Self {
        self.precipitation = kind;
        self.precipitation_mm = amount_mm;
        self
    }

    /// Set snowfall.
    #[must_use]
    pub const fn with_snowfall(mut self, snowfall_cm: f64) -> Self {
        self.snowfall_cm = Some(snowfall_cm);
        self
    }

    /// Set the daily minimum temperature.
    #[must_use]
    pub const fn with_daily_min(mut self, daily_min_c: f64) -> Self {
        self.daily_min_c = Some(daily_min_c);
        self
    }

    /// Temperature, or `None` when missing or a sentinel.
    #[must_use]
    pub fn temperature(&self) -> Option<f64> {
        within(self.temperature_c, &TEMPERATURE_RANGE)
    }

    /// Relative humidity, or `None` when out of range.
    #[must_use]
    pub fn humidity(&self) -> Option<f64> {
        within(self.humidity_pct, &HUMIDITY_RANGE)
    }

    /// Wind speed, or `None` when negative or non-finite.
    #[must_use]
    pub fn wind(&self) -> Option<f64> {
        non_negative(self.wind_ms)
    }

    /// Precipitation amount, or `None` when negative or non-finite.
    #[must_use]
    pub fn precipitation_amount(&self) -> Option<f64> {
        non_negative(self.precipitation_mm)
    }

    /// Snowfall, or `None` when missing, negative or non-finite.
    #[must_use]
    pub fn snowfall(&self) -> Option<f64> {
        self.snowfall_cm.and_then(non_negative)
    }

    /// Daily minimum, or `None` when missing or a sentinel.
    #[must_use]
    pub fn daily_min(&self) -> Option<f64> {
        self.daily_min_c
            .and_then(|value| within(value, &TEMPERATURE_RANGE))
    }

    /// Apparent ("feels like") temperature in °C.
    ///
    /// Applies the wind chill index when the air is at or below 10 °C and the
    /// wind reaches 4.8 km/h; otherwise returns the air temperature.
    ///
    /// # Examples
    /// ```
    /// use menucast_core::WeatherObservation;
    ///
    /// let calm = WeatherObservation::new(5.0);
    /// assert_eq!(calm.apparent_temperature(), Some(5.0));
    ///
    /// let windy = WeatherObservation::new(5.0).with_wind(8.0);
    /// assert!(windy.apparent_temperature().is_some_and(|t| t < 5.0));
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "wind chill is a floating-point regression formula"
    )]
    pub fn apparent_temperature(&self) -> Option<f64> {
        let temperature = self.temperature()?;
        let wind_kmh = self.wind().unwrap_or(0.0) * 3.6;
        if temperature > 10.0 || wind_kmh < 4.8 {
            return Some(temperature);
        }
        let v = wind_kmh.powf(0.16);
        let chill = 13.12 + 0.6215 * temperature - 11.37 * v + 0.3965 * temperature * v;
        Some(chill.min(temperature))
    }

    /// Copy with absent values replaced by neutral defaults.
    ///
    /// Temperature stays `NaN` when absent because no neutral value exists;
    /// the normaliser treats it as contributing nothing.
    #[must_use]
    pub fn sanitised(&self) -> Self {
        Self {
            temperature_c: self.temperature().unwrap_or(f64::NAN),
            humidity_pct: self.humidity().unwrap_or(0.0),
            wind_ms: self.wind().unwrap_or(0.0),
            sky: self.sky,
            precipitation: self.precipitation,
            precipitation_mm: self.precipitation_amount().unwrap_or(0.0),
            snowfall_cm: self.snowfall(),
            daily_min_c: self.daily_min(),
        }
    }
}

fn within(value: f64, range: &std::ops::RangeInclusive<f64>) -> Option<f64> {
    (value.is_finite() && range.contains(&value)).then_some(value)
}

fn non_negative(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}
