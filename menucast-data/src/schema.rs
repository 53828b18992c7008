//! On-disk JSON layout of a reference bundle.

use std::collections::BTreeMap;

use menucast_core::{
    AllergenHints, CategoryTable, DishIndex, DishRecord, DishWeights, ReferenceData, TagSet,
};
use serde::Deserialize;

/// Schema version written by current bundles.
pub const REFERENCE_VERSION: u32 = 1;

const fn default_version() -> u32 {
    REFERENCE_VERSION
}

/// Top-level bundle document.
#[derive(Debug, Deserialize)]
pub(crate) struct ReferenceFile {
    #[serde(default = "default_version")]
    pub(crate) version: u32,
    #[serde(default)]
    categories: CategorySection,
    #[serde(default)]
    allergens: Vec<Vec<String>>,
    #[serde(default)]
    dishes: Vec<DishEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct CategorySection {
    #[serde(default)]
    leaf: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    mid: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct DishEntry {
    name: String,
    #[serde(default)]
    keys: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    allergens: Vec<String>,
    #[serde(default)]
    weights: Option<DishWeights>,
}

impl ReferenceFile {
    /// Build the engine tables, dropping entries that cannot be used.
    pub(crate) fn into_reference(self) -> ReferenceData {
        let mut categories = CategoryTable::new();
        for (key, tags) in self.categories.leaf {
            if usable_tags(&key, &tags, "leaf") {
                categories.insert_leaf(&key, &tags);
            }
        }
        for (key, tags) in self.categories.mid {
            if usable_tags(&key, &tags, "mid") {
                categories.insert_mid(&key, &tags);
            }
        }

        let mut allergens = AllergenHints::new();
        for group in self.allergens {
            allergens.insert_group(&group);
        }

        let dishes: DishIndex = self.dishes.into_iter().map(DishEntry::into_record).collect();

        ReferenceData::new(categories, allergens, dishes)
    }
}

impl DishEntry {
    fn into_record(self) -> DishRecord {
        let mut record = DishRecord::new(self.name.trim())
            .with_keys(&self.keys)
            .with_tags(TagSet::from_raw(&self.tags))
            .with_allergens(&self.allergens);
        if let Some(weights) = self.weights {
            record = record.with_weights(weights);
        }
        record
    }
}

fn usable_tags(key: &str, tags: &[String], table: &str) -> bool {
    let usable = tags.iter().any(|tag| !tag.trim().is_empty());
    if !usable {
        log::warn!("dropping {table} category {key:?}: no tags");
    }
    usable
}
