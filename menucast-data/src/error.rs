//! Errors raised while loading reference data.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors produced while reading or decoding a reference bundle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReferenceDataError {
    /// The bundle file could not be read.
    #[error("failed to read reference data from {path}: {source}")]
    Read {
        /// File that failed to open or read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The bundle was not valid JSON or did not match the schema.
    #[error("failed to parse reference data from {origin}: {source}")]
    Parse {
        /// File path, or `"embedded"` for the built-in bundle.
        origin: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The bundle declares a schema version this build does not understand.
    #[error("reference data from {origin} has version {found}; expected {expected}")]
    UnsupportedVersion {
        /// File path, or `"embedded"` for the built-in bundle.
        origin: String,
        /// Version found in the bundle.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
}
