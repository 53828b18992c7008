//! Reference data and weather adapters for the Menucast engine.
//!
//! Responsibilities:
//! - Decode reference bundles (category tables, allergen groups and the dish
//!   catalogue) from JSON, either embedded or read from disk.
//! - Translate Korea Meteorological Administration forecast items into
//!   [`menucast_core::WeatherObservation`] values.
//!
//! Boundaries:
//! - Do not encode scoring rules (live in `menucast-scorer`).
//! - File access goes through `menucast-fs`.
//!
//! Invariants:
//! - Loading completes before the engine runs; the result is immutable.
//! - No global mutable state.
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use camino::Utf8Path;
use menucast_core::ReferenceData;

mod error;
pub mod kma;
mod schema;

pub use error::ReferenceDataError;
pub use schema::REFERENCE_VERSION;

use schema::ReferenceFile;

const EMBEDDED: &str = include_str!("../data/reference.json");
const EMBEDDED_ORIGIN: &str = "embedded";

/// Decode the reference bundle compiled into this crate.
///
/// The bundle carries English and Korean category keys, common allergen
/// synonym groups and a small dish catalogue.
///
/// # Errors
/// Returns [`ReferenceDataError`] only if the embedded bundle is corrupt,
/// which the crate's tests rule out.
///
/// # Examples
/// ```
/// use menucast_core::CategoryStrength;
///
/// let data = menucast_data::builtin()?;
/// let soup = data.categories.resolve("음식점 > 한식 > 해장국");
/// assert_eq!(soup.strength, CategoryStrength::Leaf);
/// # Ok::<(), menucast_data::ReferenceDataError>(())
/// ```
pub fn builtin() -> Result<ReferenceData, ReferenceDataError> {
    decode(EMBEDDED, EMBEDDED_ORIGIN)
}

/// Decode a reference bundle from JSON text.
///
/// Category entries without tags, blank allergen groups and nameless dishes
/// are dropped with a warning.
///
/// # Errors
/// Returns [`ReferenceDataError::Parse`] for malformed JSON and
/// [`ReferenceDataError::UnsupportedVersion`] for unknown schema versions.
pub fn from_json(json: &str) -> Result<ReferenceData, ReferenceDataError> {
    decode(json, "inline JSON")
}

/// Read and decode a reference bundle from `path`.
///
/// # Errors
/// Returns [`ReferenceDataError::Read`] when the file cannot be read, plus
/// the errors of [`from_json`].
pub fn load(path: &Utf8Path) -> Result<ReferenceData, ReferenceDataError> {
    let json = menucast_fs::read_to_string(path).map_err(|source| ReferenceDataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let data = decode(&json, path.as_str())?;
    log::debug!("loaded reference data from {path}");
    Ok(data)
}

fn decode(json: &str, origin: &str) -> Result<ReferenceData, ReferenceDataError> {
    let file: ReferenceFile =
        serde_json::from_str(json).map_err(|source| ReferenceDataError::Parse {
            origin: origin.to_owned(),
            source,
        })?;
    if file.version != REFERENCE_VERSION {
        return Err(ReferenceDataError::UnsupportedVersion {
            origin: origin.to_owned(),
            found: file.version,
            expected: REFERENCE_VERSION,
        });
    }
    Ok(file.into_reference())
}
