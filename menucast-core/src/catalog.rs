//! Dish catalogue lookup.
//!
//! A [`DishCatalog`] answers "which dish does this place most likely serve?"
//! from resolved tags and the matched category key. The engine treats the
//! catalogue as optional: when nothing matches, the dataset bonus is simply
//! skipped.

use std::collections::BTreeMap;

use crate::{TagSet, normalise_token, weather::clamp_unit};

/// Per-phenomenon affinity of a dish, each in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DishWeights {
    /// Affinity for rainy weather.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rain: f64,
    /// Affinity for snowy weather.
    #[cfg_attr(feature = "serde", serde(default))]
    pub snow: f64,
    /// Affinity for clear, sunny weather.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sun: f64,
}

impl DishWeights {
    /// Return a copy with every weight clamped into `[0.0, 1.0]`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            rain: clamp_unit(self.rain),
            snow: clamp_unit(self.snow),
            sun: clamp_unit(self.sun),
        }
    }
}

/// A dish entry from the reference dataset.
///
/// # Examples
/// ```
/// use menucast_core::{DishRecord, DishWeights, TagSet};
///
/// let dish = DishRecord::new("kimchi stew")
///     .with_keys(["stew", "찌개"])
///     .with_tags(TagSet::from_raw(["warm", "spicy~"]))
///     .with_weights(DishWeights { rain: 0.9, snow: 0.7, sun: 0.1 });
/// assert!(dish.answers_to("찌개"));
/// assert!(!dish.answers_to("salad"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DishRecord {
    /// Dish display name.
    pub name: String,
    /// Tags or category names the dish answers to.
    #[cfg_attr(feature = "serde", serde(default))]
    pub keys: Vec<String>,
    /// Tags describing the dish.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: TagSet,
    /// Allergens the dish contains.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allergens: Vec<String>,
    /// Weather affinities, when curated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weights: Option<DishWeights>,
}

impl DishRecord {
    /// Construct a dish with no keys, tags, allergens or weights.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Replace the lookup keys.
    #[must_use]
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keys = keys
            .into_iter()
            .map(|key| normalise_token(key.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();
        self
    }

    /// Replace the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    /// Replace the allergens.
    #[must_use]
    pub fn with_allergens<I, S>(mut self, allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allergens = allergens
            .into_iter()
            .map(|allergen| allergen.as_ref().to_owned())
            .collect();
        self
    }

    /// Attach weather affinities, clamped into `[0.0, 1.0]`.
    #[must_use]
    pub fn with_weights(mut self, weights: DishWeights) -> Self {
        self.weights = Some(weights.clamped());
        self
    }

    /// Report whether `key` (case-insensitive) is one of the dish's keys.
    #[must_use]
    pub fn answers_to(&self, key: &str) -> bool {
        let needle = normalise_token(key);
        !needle.is_empty()
            && self
                .keys
                .iter()
                .any(|candidate| normalise_token(candidate) == needle)
    }
}

/// Look up a dish for a resolved candidate.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so the catalogue
/// can be shared through `Arc` across request handlers. Lookups are pure.
pub trait DishCatalog: Send + Sync {
    /// Return the dish best matching `tags` or `category_key`, if any.
    fn lookup(&self, tags: &TagSet, category_key: Option<&str>) -> Option<&DishRecord>;
}

/// In-memory catalogue keyed by normalised dish key.
///
/// Lookups try the category key first, then each tag in insertion order.
/// When several dishes share a key, the first registered wins.
///
/// # Examples
/// ```
/// use menucast_core::{DishCatalog, DishIndex, DishRecord, TagSet};
///
/// let index = DishIndex::from_records([
///     DishRecord::new("kimchi stew").with_keys(["stew"]),
///     DishRecord::new("naengmyeon").with_keys(["cold noodle", "cold"]),
/// ]);
/// let hit = index.lookup(&TagSet::from_raw(["cold", "noodle"]), None);
/// assert_eq!(hit.map(|dish| dish.name.as_str()), Some("naengmyeon"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DishIndex {
    records: Vec<DishRecord>,
    by_key: BTreeMap<String, usize>,
}

impl DishIndex {
    /// Construct an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from records.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = DishRecord>,
    {
        let mut index = Self::new();
        for record in records {
            index.insert(record);
        }
        index
    }

    /// Register a dish. Dishes without a name are ignored.
    pub fn insert(&mut self, record: DishRecord) {
        if record.name.trim().is_empty() {
            log::warn!("ignoring dish record without a name");
            return;
        }
        let position = self.records.len();
        for key in &record.keys {
            let key = normalise_token(key);
            if !key.is_empty() {
                self.by_key.entry(key).or_insert(position);
            }
        }
        self.records.push(record);
    }

    /// Registered dishes in insertion order.
    #[must_use]
    pub fn records(&self) -> &[DishRecord] {
        &self.records
    }

    /// Number of registered dishes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Report whether no dish is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn by_key(&self, key: &str) -> Option<&DishRecord> {
        self.by_key
            .get(&normalise_token(key))
            .and_then(|position| self.records.get(*position))
    }
}

impl DishCatalog for DishIndex {
    fn lookup(&self, tags: &TagSet, category_key: Option<&str>) -> Option<&DishRecord> {
        category_key
            .and_then(|key| self.by_key(key))
            .or_else(|| tags.names().find_map(|tag| self.by_key(tag)))
    }
}

impl FromIterator<DishRecord> for DishIndex {
    fn from_iter<I: IntoIterator<Item = DishRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
