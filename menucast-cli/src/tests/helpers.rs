//! Test helpers for staging request and observation files.

use camino::{Utf8Path, Utf8PathBuf};
use menucast_core::{
    Candidate, PrecipitationType, RecommendationRequest, UserPreference, WeatherObservation,
};
use tempfile::TempDir;

/// Identifier of the soup restaurant in [`cold_rain_request`].
pub(super) const SOUP_ID: u64 = 1;
/// Identifier of the bingsu cafe in [`cold_rain_request`].
pub(super) const BINGSU_ID: u64 = 2;
/// Identifier of the seafood restaurant in [`cold_rain_request`].
pub(super) const SEAFOOD_ID: u64 = 3;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    let text = std::str::from_utf8(contents).expect("utf-8 contents");
    menucast_fs::write_string(path, text).expect("write file");
}

/// Temporary directory with a UTF-8 root path.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

/// Three nearby places on a cold, rainy evening.
pub(super) fn cold_rain_request(preferences: UserPreference) -> RecommendationRequest {
    RecommendationRequest {
        candidates: vec![
            Candidate::new(SOUP_ID, "Haejang House", "Restaurant > Korean > Soup", 200.0),
            Candidate::new(BINGSU_ID, "Snow Flake", "Cafe > Bingsu", 200.0),
            Candidate::new(SEAFOOD_ID, "Harbour Table", "Restaurant > Seafood", 200.0),
        ],
        weather: WeatherObservation::new(5.0)
            .with_humidity(85.0)
            .with_precipitation(PrecipitationType::Rain, 2.5),
        preferences,
        origin: None,
    }
}

pub(super) fn write_request(path: &Utf8Path, request: &RecommendationRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}
