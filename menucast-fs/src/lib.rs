//! Capability-based file access for reference data, requests and reports.
//!
//! Paths are UTF-8 (`camino`) and every operation goes through a `cap-std`
//! directory handle opened from the path's parent, so callers never touch
//! `std::fs` directly.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs::Metadata;
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Read a whole UTF-8 text file.
///
/// # Errors
/// Returns the underlying I/O error when the parent directory cannot be
/// opened or the file cannot be read.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
///
/// let json = menucast_fs::read_to_string(Utf8Path::new("reference.json"))?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = parent_dir_and_name(path)?;
    dir.read_to_string(name.as_str())
}

/// Write `contents` to `path`, creating missing parent directories.
///
/// # Errors
/// Returns the underlying I/O error when a directory cannot be created or
/// the file cannot be written.
pub fn write_string(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = parent_dir_and_name(path)?;
    dir.write(name.as_str(), contents)
}

/// Report whether `path` names an existing regular file.
///
/// A missing file or parent directory yields `Ok(false)`.
///
/// # Errors
/// Returns other I/O errors, such as permission failures.
pub fn is_file(path: &Utf8Path) -> io::Result<bool> {
    Ok(metadata(path)?.is_some_and(|meta| meta.is_file()))
}

/// Report whether anything exists at `path`.
///
/// # Errors
/// Returns I/O errors other than `NotFound`.
pub fn exists(path: &Utf8Path) -> io::Result<bool> {
    Ok(metadata(path)?.is_some())
}

fn metadata(path: &Utf8Path) -> io::Result<Option<Metadata>> {
    let (dir, name) = match parent_dir_and_name(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(Some(meta)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Create the parent directory of `path` and any missing ancestors.
///
/// # Errors
/// Returns the underlying I/O error when a directory cannot be created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }
    let (root, relative) = anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    root.create_dir_all(&relative)
}

fn parent_dir_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?
        .to_owned();
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `parent` into an ambient root directory and the relative remainder.
fn anchor(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();
    let root = match std_parent.components().next() {
        Some(Component::Prefix(prefix)) => {
            let text = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(text).join(std::path::MAIN_SEPARATOR_STR)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        _ => Utf8PathBuf::from("."),
    };
    let relative = if root.as_str() == "." {
        parent.to_path_buf()
    } else {
        parent
            .strip_prefix(&root)
            .map_err(|_| io::Error::other("failed to strip root from parent path"))?
            .to_path_buf()
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&root, ambient_authority())?;
    Ok((dir, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn scratch() -> (TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        (dir, root)
    }

    #[rstest]
    fn writes_then_reads_nested_files(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let target = root.join("reports/today/result.json");
        write_string(&target, "{\"ok\":true}").expect("write report");
        assert_eq!(
            read_to_string(&target).expect("read report"),
            "{\"ok\":true}"
        );
        assert!(is_file(&target).expect("stat report"));
    }

    #[rstest]
    fn missing_paths_are_not_files(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        assert!(!is_file(&root.join("absent.json")).expect("stat file"));
        assert!(!is_file(&root.join("absent/dir/file.json")).expect("stat nested"));
    }

    #[rstest]
    fn directories_are_not_files(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let nested = root.join("data/file.json");
        ensure_parent_dir(&nested).expect("create parent");
        assert!(!is_file(&root.join("data")).expect("stat dir"));
        assert!(exists(&root.join("data")).expect("stat dir"));
        assert!(!exists(&root.join("absent")).expect("stat missing"));
    }

    #[rstest]
    fn reading_a_missing_file_fails(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let err = read_to_string(&root.join("nope.json")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
