//! Adapter for Korea Meteorological Administration forecast items.
//!
//! The short-term and ultra-short-term forecast APIs return one item per
//! category, with values encoded as text. Amounts use phrases such as
//! `"강수없음"` (no precipitation), `"1mm 미만"` (under 1 mm) or ranges like
//! `"30.0~50.0mm"`. This module turns those items into a
//! [`WeatherObservation`].

use menucast_core::{PrecipitationType, SkyCode, WeatherObservation};
use serde::{Deserialize, Serialize};

/// Values at or beyond this magnitude are missing-data sentinels.
const SENTINEL_MAGNITUDE: f64 = 900.0;

/// One forecast item: a category code and its textual value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KmaField {
    /// Category code such as `T1H` or `PTY`.
    pub category: String,
    /// Raw value; forecast payloads call it `fcstValue`, nowcasts `obsrValue`.
    #[serde(alias = "fcstValue", alias = "obsrValue")]
    pub value: String,
}

impl KmaField {
    /// Build a field from a category and value.
    #[must_use]
    pub fn new(category: &str, value: &str) -> Self {
        Self {
            category: category.to_owned(),
            value: value.to_owned(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Items(Vec<KmaField>),
    Envelope { response: Response },
}

#[derive(Deserialize)]
struct Response {
    body: Body,
}

#[derive(Deserialize)]
struct Body {
    items: Items,
}

#[derive(Deserialize)]
struct Items {
    item: Vec<KmaField>,
}

/// Decode forecast items from JSON.
///
/// Accepts either a bare array of items or the full API envelope
/// (`response.body.items.item`).
///
/// # Errors
/// Returns the JSON error when `json` matches neither shape.
///
/// # Examples
/// ```
/// use menucast_data::kma::fields_from_json;
///
/// let fields = fields_from_json(r#"[{"category": "T1H", "obsrValue": "3.1"}]"#)?;
/// assert_eq!(fields.len(), 1);
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn fields_from_json(json: &str) -> Result<Vec<KmaField>, serde_json::Error> {
    let payload: Payload = serde_json::from_str(json)?;
    Ok(match payload {
        Payload::Items(items) => items,
        Payload::Envelope { response } => response.body.items.item,
    })
}

/// Build an observation from forecast items.
///
/// Recognised categories are `T1H`/`TMP` (temperature), `REH` (humidity),
/// `WSD` (wind), `SKY`, `PTY`, `RN1`/`PCP` (precipitation), `SNO`
/// (snowfall) and `TMN` (daily minimum). Unknown categories are ignored and
/// values that cannot be parsed leave the field absent. When a category
/// repeats, the later item wins.
///
/// # Examples
/// ```
/// use menucast_core::{PrecipitationType, SkyCode};
/// use menucast_data::kma::{KmaField, observation_from_fields};
///
/// let obs = observation_from_fields(&[
///     KmaField::new("T1H", "4.5"),
///     KmaField::new("PTY", "1"),
///     KmaField::new("RN1", "1mm 미만"),
///     KmaField::new("SKY", "4"),
/// ]);
/// assert_eq!(obs.temperature(), Some(4.5));
/// assert_eq!(obs.precipitation, PrecipitationType::Rain);
/// assert_eq!(obs.precipitation_amount(), Some(0.5));
/// assert_eq!(obs.sky, SkyCode::Overcast);
/// ```
#[must_use]
pub fn observation_from_fields(fields: &[KmaField]) -> WeatherObservation {
    let mut obs = WeatherObservation::default();
    for field in fields {
        let value = field.value.as_str();
        match field.category.trim() {
            "T1H" | "TMP" => {
                if let Some(celsius) = logged(field, parse_number(value)) {
                    obs.temperature_c = celsius;
                }
            }
            "REH" => {
                if let Some(percent) = logged(field, parse_number(value)) {
                    obs.humidity_pct = percent;
                }
            }
            "WSD" => {
                if let Some(speed) = logged(field, parse_number(value)) {
                    obs.wind_ms = speed;
                }
            }
            "SKY" => {
                if let Some(code) = logged(field, parse_code(value)) {
                    obs.sky = SkyCode::from_code(code);
                }
            }
            "PTY" => {
                if let Some(code) = logged(field, parse_code(value)) {
                    obs.precipitation = PrecipitationType::from_code(code);
                }
            }
            "RN1" | "PCP" => {
                if let Some(amount) = logged(field, parse_amount(value)) {
                    obs.precipitation_mm = amount;
                }
            }
            "SNO" => obs.snowfall_cm = logged(field, parse_amount(value)),
            "TMN" => obs.daily_min_c = logged(field, parse_number(value)),
            _ => {}
        }
    }
    obs
}

fn logged<T>(field: &KmaField, parsed: Option<T>) -> Option<T> {
    if parsed.is_none() {
        log::debug!(
            "ignoring unparsable {} value {:?}",
            field.category,
            field.value
        );
    }
    parsed
}

/// Parse a plain number, rejecting sentinels.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.abs() < SENTINEL_MAGNITUDE)
}

fn parse_code(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Parse a textual precipitation or snowfall amount.
///
/// "None" phrases yield `0.0`, "under N" yields half of `N`, "N or more"
/// yields `N` and a range yields its midpoint.
#[expect(
    clippy::float_arithmetic,
    reason = "bounded phrases map to halves and midpoints"
)]
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() || text == "-" {
        return None;
    }
    if text == "강수없음" || text == "적설없음" {
        return Some(0.0);
    }
    if let Some(bound) = text.strip_suffix("미만") {
        return with_unit(bound).map(|limit| limit / 2.0);
    }
    if let Some(bound) = text.strip_suffix("이상") {
        return with_unit(bound);
    }
    if let Some((low, high)) = text.split_once('~') {
        return match (with_unit(low), with_unit(high)) {
            (Some(lower), Some(upper)) => Some((lower + upper) / 2.0),
            _ => None,
        };
    }
    with_unit(text).filter(|amount| *amount >= 0.0)
}

/// Parse a number that may carry a trailing `mm` or `cm` unit.
fn with_unit(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed
        .strip_suffix("mm")
        .or_else(|| trimmed.strip_suffix("cm"))
        .unwrap_or(trimmed);
    parse_number(number)
}
