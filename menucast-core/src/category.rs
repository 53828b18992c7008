//! Category resolution: hierarchical place categories to semantic tags.
//!
//! A category path such as `"Restaurant > Korean > Soup"` is split into
//! levels and matched against two tables. The **leaf** table is consulted
//! for the most specific level first; when it has nothing to say, the **mid**
//! table is scanned from the most specific level outwards. Leaf matches are
//! always preferred over mid matches.
//!
//! Keys compare case- and whitespace-insensitively. When no key matches a
//! level exactly, any key contained in the level is accepted, trying longer
//! keys first so that `"cold noodle"` beats `"noodle"`.
//!
//! # Examples
//! ```
//! use menucast_core::{CategoryStrength, CategoryTable};
//!
//! let table = CategoryTable::new()
//!     .with_leaf("Soup", ["soup", "warm", "broth"])
//!     .with_mid("Korean", ["korean", "warm~"]);
//!
//! let soup = table.resolve("Restaurant > Korean > Soup");
//! assert_eq!(soup.strength, CategoryStrength::Leaf);
//! assert!(soup.tags.contains("broth"));
//!
//! let korean = table.resolve("Restaurant > Korean > Bibimbap");
//! assert_eq!(korean.strength, CategoryStrength::Mid);
//! assert_eq!(korean.matched_key.as_deref(), Some("korean"));
//! ```

use std::collections::BTreeMap;

use crate::TagSet;

/// Separators accepted between category levels.
pub const PATH_SEPARATORS: [char; 3] = ['>', '|', '/'];

/// Split a category path into trimmed, non-empty levels.
///
/// # Examples
/// ```
/// use menucast_core::split_path;
///
/// assert_eq!(split_path(" Food >> Korean |  / Soup "), vec!["Food", "Korean", "Soup"]);
/// assert!(split_path("").is_empty());
/// ```
#[must_use]
pub fn split_path(path: &str) -> Vec<String> {
    path.split(PATH_SEPARATORS.as_slice())
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Normalise a table key or level: lowercase with all whitespace removed.
#[must_use]
pub fn normalise_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// How specific the category match was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CategoryStrength {
    /// The most specific level matched the leaf table.
    Leaf,
    /// A broader level matched the mid table.
    Mid,
    /// Nothing matched.
    None,
}

impl CategoryStrength {
    /// Lowercase label for the strength.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leaf => "leaf",
            Self::Mid => "mid",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for CategoryStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving a category path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryResolution {
    /// Parsed levels, outermost first.
    pub levels: Vec<String>,
    /// Tags attached by the matching table entry.
    pub tags: TagSet,
    /// Which table produced the tags.
    pub strength: CategoryStrength,
    /// Normalised table key that matched, if any.
    pub matched_key: Option<String>,
}

impl CategoryResolution {
    fn unmatched(levels: Vec<String>) -> Self {
        Self {
            levels,
            tags: TagSet::new(),
            strength: CategoryStrength::None,
            matched_key: None,
        }
    }
}

/// One lookup table keyed by normalised category name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct KeyedTags {
    entries: BTreeMap<String, TagSet>,
    /// Keys ordered longest first, then alphabetically, for substring lookup.
    fallback_order: Vec<String>,
}

impl KeyedTags {
    fn insert(&mut self, key: &str, tags: TagSet) {
        let normalised = normalise_key(key);
        if normalised.is_empty() {
            log::warn!("ignoring category table entry with an empty key");
            return;
        }
        if self.entries.insert(normalised.clone(), tags).is_none() {
            self.fallback_order.push(normalised);
            self.fallback_order
                .sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
        }
    }

    fn exact(&self, level: &str) -> Option<(&str, &TagSet)> {
        self.entries
            .get_key_value(level)
            .map(|(key, tags)| (key.as_str(), tags))
    }

    fn contained(&self, level: &str) -> Option<(&str, &TagSet)> {
        self.fallback_order
            .iter()
            .find(|key| level.contains(key.as_str()))
            .and_then(|key| self.exact(key))
    }

    fn lookup(&self, level: &str) -> Option<(&str, &TagSet)> {
        self.exact(level).or_else(|| self.contained(level))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Leaf and mid category tables.
///
/// Tables are built once and treated as immutable reference data. An empty
/// table resolves every path to [`CategoryStrength::None`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTable {
    leaf: KeyedTags,
    mid: KeyedTags,
}

impl CategoryTable {
    /// Construct empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a leaf entry. Tag values may carry the soft marker.
    pub fn insert_leaf<I, S>(&mut self, key: &str, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.leaf.insert(key, TagSet::from_raw(tags));
    }

    /// Insert or replace a mid entry. Tag values may carry the soft marker.
    pub fn insert_mid<I, S>(&mut self, key: &str, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.mid.insert(key, TagSet::from_raw(tags));
    }

    /// Add a leaf entry while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_leaf<I, S>(mut self, key: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.insert_leaf(key, tags);
        self
    }

    /// Add a mid entry while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_mid<I, S>(mut self, key: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.insert_mid(key, tags);
        self
    }

    /// Number of leaf and mid entries.
    #[must_use]
    pub fn len(&self) -> (usize, usize) {
        (self.leaf.len(), self.mid.len())
    }

    /// Report whether both tables are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaf.len() == 0 && self.mid.len() == 0
    }

    /// Resolve a separated category path.
    #[must_use]
    pub fn resolve(&self, path: &str) -> CategoryResolution {
        self.resolve_levels(&split_path(path))
    }

    /// Resolve pre-split levels, outermost first.
    ///
    /// Levels are re-split on separators so callers may pass either a clean
    /// level list or raw provider strings.
    #[must_use]
    pub fn resolve_levels<S: AsRef<str>>(&self, levels: &[S]) -> CategoryResolution {
        let levels: Vec<String> = levels
            .iter()
            .flat_map(|level| split_path(level.as_ref()))
            .collect();
        let normalised: Vec<String> = levels.iter().map(|level| normalise_key(level)).collect();

        let Some(last) = normalised.last() else {
            return CategoryResolution::unmatched(levels);
        };

        if let Some((key, tags)) = self.leaf.lookup(last)
            && !tags.is_empty()
        {
            return resolution(levels, key, tags, CategoryStrength::Leaf);
        }

        let mid_hit = normalised
            .iter()
            .rev()
            .find_map(|level| self.mid.lookup(level).filter(|(_, tags)| !tags.is_empty()));
        let Some((key, tags)) = mid_hit else {
            return CategoryResolution::unmatched(levels);
        };
        resolution(levels, key, tags, CategoryStrength::Mid)
    }
}

fn resolution(
    levels: Vec<String>,
    key: &str,
    tags: &TagSet,
    strength: CategoryStrength,
) -> CategoryResolution {
    CategoryResolution {
        levels,
        tags: tags.clone(),
        strength,
        matched_key: Some(key.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> CategoryTable {
        CategoryTable::new()
            .with_leaf("Soup", ["soup", "warm", "broth"])
            .with_leaf("Cold Noodle", ["cold", "noodle", "refresh"])
            .with_leaf("Noodle", ["noodle", "warm~"])
            .with_mid("Korean", ["korean", "warm~"])
            .with_mid("Snack", ["snack", "light"])
            .with_mid("Soup", ["mid-soup"])
    }

    #[rstest]
    #[case("Restaurant > Korean > Soup", CategoryStrength::Leaf, "soup")]
    #[case("restaurant>korean>SOUP", CategoryStrength::Leaf, "soup")]
    #[case("Restaurant > Snack", CategoryStrength::Mid, "snack")]
    #[case("Restaurant > Korean > Bibimbap", CategoryStrength::Mid, "korean")]
    #[case("Restaurant > Korean > Naengmyeon Cold Noodle", CategoryStrength::Leaf, "coldnoodle")]
    #[case("Restaurant > Korean Snack Bar", CategoryStrength::Mid, "korean")]
    fn resolves_expected_key(
        table: CategoryTable,
        #[case] path: &str,
        #[case] strength: CategoryStrength,
        #[case] key: &str,
    ) {
        let resolved = table.resolve(path);
        assert_eq!(resolved.strength, strength);
        assert_eq!(resolved.matched_key.as_deref(), Some(key));
    }

    #[rstest]
    fn leaf_wins_over_mid_for_same_level(table: CategoryTable) {
        let resolved = table.resolve("Food > Soup");
        assert_eq!(resolved.strength, CategoryStrength::Leaf);
        assert!(!resolved.tags.contains("mid-soup"));
    }

    #[rstest]
    #[case("")]
    #[case(" >> | / ")]
    #[case("Bookshop > Poetry")]
    fn unmatched_paths_have_no_tags(table: CategoryTable, #[case] path: &str) {
        let resolved = table.resolve(path);
        assert_eq!(resolved.strength, CategoryStrength::None);
        assert!(resolved.tags.is_empty());
        assert!(resolved.matched_key.is_none());
    }

    #[test]
    fn empty_table_never_matches() {
        let resolved = CategoryTable::new().resolve("Restaurant > Korean > Soup");
        assert_eq!(resolved.strength, CategoryStrength::None);
        assert_eq!(resolved.levels.len(), 3);
    }

    #[rstest]
    fn resolve_levels_resplits_raw_strings(table: CategoryTable) {
        let resolved = table.resolve_levels(&["Restaurant > Korean", "Soup"]);
        assert_eq!(resolved.levels, vec!["Restaurant", "Korean", "Soup"]);
        assert_eq!(resolved.strength, CategoryStrength::Leaf);
    }

    #[test]
    fn entries_without_tags_are_skipped() {
        let table = CategoryTable::new()
            .with_leaf("Soup", [""; 0])
            .with_mid("Korean", ["korean"]);
        let resolved = table.resolve("Korean > Soup");
        assert_eq!(resolved.strength, CategoryStrength::Mid);
    }

    #[test]
    fn longer_keys_win_substring_fallback() {
        let table = CategoryTable::new()
            .with_mid("noodle", ["noodle"])
            .with_mid("cold noodle", ["cold"]);
        let resolved = table.resolve("Restaurant > Spicy Cold Noodle House");
        assert_eq!(resolved.matched_key.as_deref(), Some("coldnoodle"));
    }
}
