//! Input checks and JSON document IO shared by the subcommands.

use std::io::Write;

use camino::Utf8Path;
use serde::{Serialize, de::DeserializeOwned};

use crate::CliError;

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    let inspect = |source| CliError::InspectSourcePath {
        field,
        path: path.to_path_buf(),
        source,
    };
    if menucast_fs::is_file(path).map_err(inspect)? {
        return Ok(());
    }
    if menucast_fs::exists(path).map_err(inspect)? {
        return Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        });
    }
    Err(CliError::MissingSourceFile {
        field,
        path: path.to_path_buf(),
    })
}

/// Read a text document, naming it `what` in errors.
pub(crate) fn read_text(path: &Utf8Path, what: &'static str) -> Result<String, CliError> {
    menucast_fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        what,
        path: path.to_path_buf(),
        source,
    })
}

/// Read and decode a JSON document, naming it `what` in errors.
pub(crate) fn read_json<T: DeserializeOwned>(
    path: &Utf8Path,
    what: &'static str,
) -> Result<T, CliError> {
    let text = read_text(path, what)?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseInput {
        what,
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty JSON to `destination`, or to `writer` when no
/// destination is configured.
pub(crate) fn write_json<T: Serialize>(
    writer: &mut dyn Write,
    destination: Option<&Utf8Path>,
    value: &T,
) -> Result<(), CliError> {
    let mut payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    payload.push('\n');
    if let Some(path) = destination {
        menucast_fs::write_string(path, &payload).map_err(|source| {
            CliError::WriteOutputFile {
                path: path.to_path_buf(),
                source,
            }
        })?;
        log::debug!("wrote output to {path}");
        return Ok(());
    }
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)
}
