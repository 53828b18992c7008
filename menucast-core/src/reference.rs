use crate::{AllergenHints, CategoryTable, DishIndex};

/// Immutable reference tables consulted by the engine.
///
/// Build the bundle once (typically through `menucast-data`) and share it
/// read-only, e.g. behind an `Arc`. [`ReferenceData::default`] is empty:
/// every category resolves to the baseline, allergens only match
/// themselves and no dish is ever found.
///
/// # Examples
/// ```
/// use menucast_core::{CategoryStrength, CategoryTable, ReferenceData};
///
/// let data = ReferenceData::new(
///     CategoryTable::new().with_leaf("soup", ["soup", "warm"]),
///     Default::default(),
///     Default::default(),
/// );
/// let resolution = data.categories.resolve("Restaurant > Korean > Soup");
/// assert_eq!(resolution.strength, CategoryStrength::Leaf);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    /// Leaf and mid category tables.
    pub categories: CategoryTable,
    /// Allergen synonym groups.
    pub allergens: AllergenHints,
    /// Dish catalogue.
    pub dishes: DishIndex,
}

impl ReferenceData {
    /// Bundle the three tables.
    #[must_use]
    pub const fn new(categories: CategoryTable, allergens: AllergenHints, dishes: DishIndex) -> Self {
        Self {
            categories,
            allergens,
            dishes,
        }
    }

    /// Report whether every table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.allergens.is_empty() && self.dishes.is_empty()
    }
}
