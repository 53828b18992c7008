//! Semantic tags attached to candidates by category resolution.
//!
//! Tags are lowercase tokens such as `soup` or `salad`. Table values may end
//! with the soft marker `~` to signal partial confidence; the marker is
//! stripped for membership tests but halves the tag's weight.
//!
//! # Examples
//! ```
//! use menucast_core::{Tag, TagConfidence};
//!
//! let tag = Tag::parse(" Warm~ ").expect("non-empty tag");
//! assert_eq!(tag.name(), "warm");
//! assert_eq!(tag.confidence(), TagConfidence::Soft);
//! assert_eq!(tag.to_string(), "warm~");
//! ```

use std::fmt;

/// Trailing marker denoting a soft (partial confidence) tag.
pub const SOFT_MARKER: char = '~';

/// Lowercase and trim a free-form token for comparisons.
///
/// # Examples
/// ```
/// assert_eq!(menucast_core::normalise_token("  Shell Fish "), "shell fish");
/// ```
#[must_use]
pub fn normalise_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Confidence attached to a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TagConfidence {
    /// The tag fully describes the category.
    Full,
    /// The tag only partially applies.
    Soft,
}

impl TagConfidence {
    /// Weight contributed by a tag of this confidence.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Full => 1.0,
            Self::Soft => 0.5,
        }
    }
}

/// A normalised semantic tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    name: String,
    confidence: TagConfidence,
}

impl Tag {
    /// Parse a raw table value, honouring the trailing soft marker.
    ///
    /// Returns `None` when nothing remains after trimming.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (body, confidence) = trimmed.strip_suffix(SOFT_MARKER).map_or(
            (trimmed, TagConfidence::Full),
            |stripped| (stripped, TagConfidence::Soft),
        );
        let name = normalise_token(body.trim_end_matches(SOFT_MARKER));
        if name.is_empty() {
            return None;
        }
        Some(Self { name, confidence })
    }

    /// Build a full-confidence tag.
    #[must_use]
    pub fn full(name: &str) -> Self {
        Self {
            name: normalise_token(name),
            confidence: TagConfidence::Full,
        }
    }

    /// Build a soft tag.
    #[must_use]
    pub fn soft(name: &str) -> Self {
        Self {
            name: normalise_token(name),
            confidence: TagConfidence::Soft,
        }
    }

    /// The tag without its soft marker.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Confidence carried by the tag.
    #[must_use]
    pub const fn confidence(&self) -> TagConfidence {
        self.confidence
    }

    /// Weight contributed to diversity scoring.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.confidence.weight()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.confidence == TagConfidence::Soft {
            write!(f, "{SOFT_MARKER}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Tag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| serde::de::Error::custom("tag must not be empty"))
    }
}

/// Ordered, de-duplicated collection of tags.
///
/// Insertion order is preserved. When the same name is inserted twice, a full
/// tag replaces a soft one but never the other way round.
///
/// # Examples
/// ```
/// use menucast_core::{Tag, TagSet};
///
/// let tags = TagSet::from_raw(["soup", "warm~", "SOUP"]);
/// assert_eq!(tags.len(), 2);
/// assert!(tags.contains("warm"));
/// assert_eq!(tags.total_weight(), 1.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    /// Construct an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Parse raw values, dropping empty ones.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        set.extend(raw.into_iter().filter_map(|value| Tag::parse(value.as_ref())));
        set
    }

    /// Insert a tag, keeping the stronger confidence on duplicates.
    pub fn insert(&mut self, tag: Tag) {
        match self.tags.iter_mut().find(|existing| existing.name == tag.name) {
            Some(existing) => {
                if tag.confidence == TagConfidence::Full {
                    existing.confidence = TagConfidence::Full;
                }
            }
            None => self.tags.push(tag),
        }
    }

    /// Report whether a tag with `name` is present, ignoring soft markers.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        let needle = normalise_token(name);
        self.tags.iter().any(|tag| tag.name == needle)
    }

    /// Report whether any of `names` is present.
    #[must_use]
    pub fn contains_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.contains(name))
    }

    /// Iterate over stripped tag names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(Tag::name)
    }

    /// Iterate over the tags.
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// Number of distinct tags.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tags.len()
    }

    /// Report whether the set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Sum of tag weights (full = 1.0, soft = 0.5).
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.tags.iter().map(Tag::weight).sum()
    }
}

impl Extend<Tag> for TagSet {
    fn extend<I: IntoIterator<Item = Tag>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag);
        }
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
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

    #[rstest]
    #[case("soup", "soup", TagConfidence::Full)]
    #[case(" Hot Pot ", "hot pot", TagConfidence::Full)]
    #[case("warm~", "warm", TagConfidence::Soft)]
    #[case("warm~~", "warm", TagConfidence::Soft)]
    fn parse_strips_marker(
        #[case] raw: &str,
        #[case] name: &str,
        #[case] confidence: TagConfidence,
    ) {
        let tag = Tag::parse(raw).expect("tag should parse");
        assert_eq!(tag.name(), name);
        assert_eq!(tag.confidence(), confidence);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("~")]
    fn parse_rejects_empty(#[case] raw: &str) {
        assert!(Tag::parse(raw).is_none());
    }

    #[test]
    fn full_tag_upgrades_soft_duplicate() {
        let mut tags = TagSet::from_raw(["warm~"]);
        tags.insert(Tag::full("warm"));
        assert_eq!(tags.len(), 1);
        assert!((tags.total_weight() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn soft_tag_never_downgrades_full_duplicate() {
        let mut tags = TagSet::from_raw(["warm"]);
        tags.insert(Tag::soft("warm"));
        assert_eq!(tags.iter().next().map(Tag::confidence), Some(TagConfidence::Full));
    }

    #[test]
    fn display_restores_marker() {
        assert_eq!(Tag::soft("broth").to_string(), "broth~");
        assert_eq!(Tag::full("broth").to_string(), "broth");
    }
}
