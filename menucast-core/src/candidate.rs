use geo::{Coord, Distance, Haversine, Point};

use crate::{TagSet, category::split_path};

/// A place (or dish-backed place) that may be recommended.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The
/// category path is stored outermost first, e.g. `["Restaurant", "Korean",
/// "Soup"]`.
///
/// # Examples
/// ```
/// use menucast_core::Candidate;
///
/// let candidate = Candidate::new(7, "Haejang House", "Restaurant > Korean > Soup", 250.0);
///
/// assert_eq!(candidate.id, 7);
/// assert_eq!(candidate.category_path, vec!["Restaurant", "Korean", "Soup"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Unique identifier supplied by the places provider.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Category levels, outermost first.
    ///
    /// Deserialises from a separated string or a list of levels. Any other
    /// shape yields no levels.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "category_levels::deserialize")
    )]
    pub category_path: Vec<String>,
    /// Distance from the querying user in metres, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_m: Option<f64>,
    /// Geographic position, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<Coord<f64>>,
    /// Tags declared by the data source in addition to resolved ones.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: TagSet,
    /// Allergens declared by the data source.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allergens: Vec<String>,
}

impl Candidate {
    /// Construct a candidate from a separated category string.
    ///
    /// The category is split on `>`, `|` and `/`.
    #[must_use]
    pub fn new(id: u64, name: &str, category: &str, distance_m: f64) -> Self {
        Self {
            id,
            name: name.to_owned(),
            category_path: split_path(category),
            distance_m: Some(distance_m),
            location: None,
            tags: TagSet::new(),
            allergens: Vec::new(),
        }
    }

    /// Attach a location while returning `self` for chaining.
    #[must_use]
    pub const fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach declared tags while returning `self` for chaining.
    #[must_use]
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    /// Attach declared allergens while returning `self` for chaining.
    #[must_use]
    pub fn with_allergens<I, S>(mut self, allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergens = allergens.into_iter().map(Into::into).collect();
        self
    }

    /// Distance used for scoring, in metres.
    ///
    /// A finite, non-negative declared distance wins. Otherwise the haversine
    /// distance from `origin` is used when both positions are known. Anything
    /// else yields `0.0` so that a missing distance never penalises.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use menucast_core::Candidate;
    ///
    /// let mut candidate = Candidate::new(1, "Cafe", "Cafe", -5.0);
    /// assert_eq!(candidate.effective_distance(None), 0.0);
    ///
    /// candidate.distance_m = None;
    /// candidate.location = Some(Coord { x: 126.9780, y: 37.5665 });
    /// let origin = Coord { x: 126.9780, y: 37.5755 };
    /// let metres = candidate.effective_distance(Some(origin));
    /// assert!((metres - 1000.0).abs() < 10.0);
    /// ```
    #[must_use]
    pub fn effective_distance(&self, origin: Option<Coord<f64>>) -> f64 {
        if let Some(declared) = self.distance_m
            && declared.is_finite()
            && declared >= 0.0
        {
            return declared;
        }
        match (origin, self.location) {
            (Some(from), Some(to)) => {
                let metres = Haversine.distance(Point::from(from), Point::from(to));
                if metres.is_finite() { metres } else { 0.0 }
            }
            _ => 0.0,
        }
    }

    /// The category path joined with ` > `.
    #[must_use]
    pub fn category_label(&self) -> String {
        self.category_path.join(" > ")
    }
}

#[cfg(feature = "serde")]
mod category_levels {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    use crate::category::split_path;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shape {
        Text(String),
        Levels(Vec<String>),
        Other(IgnoredAny),
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let levels = match Shape::deserialize(deserializer)? {
            Shape::Text(path) => split_path(&path),
            Shape::Levels(levels) => levels.iter().flat_map(|level| split_path(level)).collect(),
            Shape::Other(IgnoredAny) => {
                log::debug!("ignoring category path of unexpected shape");
                Vec::new()
            }
        };
        Ok(levels)
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floats within a tolerance"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn new_splits_category() {
        let candidate = Candidate::new(1, "Noodle Bar", "Restaurant | Japanese / Ramen", 10.0);
        assert_eq!(candidate.category_path, vec!["Restaurant", "Japanese", "Ramen"]);
        assert_eq!(candidate.category_label(), "Restaurant > Japanese > Ramen");
    }

    #[rstest]
    #[case(Some(120.0), 120.0)]
    #[case(Some(0.0), 0.0)]
    #[case(Some(-1.0), 0.0)]
    #[case(Some(f64::NAN), 0.0)]
    #[case(Some(f64::INFINITY), 0.0)]
    #[case(None, 0.0)]
    fn effective_distance_without_origin(#[case] declared: Option<f64>, #[case] expected: f64) {
        let mut candidate = Candidate::new(1, "Place", "Restaurant", 0.0);
        candidate.distance_m = declared;
        assert!((candidate.effective_distance(None) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn declared_distance_beats_coordinates() {
        let candidate = Candidate::new(1, "Place", "Restaurant", 42.0)
            .with_location(Coord { x: 127.0, y: 37.0 });
        let distance = candidate.effective_distance(Some(Coord { x: 128.0, y: 38.0 }));
        assert!((distance - 42.0).abs() < f64::EPSILON);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case::separated_string(r#""Restaurant > Korean > Soup""#, &["Restaurant", "Korean", "Soup"])]
    #[case::level_list(r#"["Restaurant", " Korean ", ""]"#, &["Restaurant", "Korean"])]
    #[case::nested_separators(r#"["Restaurant > Korean", "Soup"]"#, &["Restaurant", "Korean", "Soup"])]
    #[case::null("null", &[])]
    #[case::number("42", &[])]
    #[case::object(r#"{"depth": 3}"#, &[])]
    #[case::mixed_list(r#"["Restaurant", 7]"#, &[])]
    fn category_path_accepts_strings_and_lists(#[case] path: &str, #[case] expected: &[&str]) {
        let json = format!(r#"{{"id": 1, "name": "Haejang House", "category_path": {path}}}"#);
        let candidate: Candidate = serde_json::from_str(&json).expect("candidate decodes");
        assert_eq!(candidate.category_path, expected);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_category_path_defaults_to_empty() {
        let candidate: Candidate =
            serde_json::from_str(r#"{"id": 1, "name": "Haejang House"}"#)
                .expect("candidate decodes");
        assert!(candidate.category_path.is_empty());
    }
}
