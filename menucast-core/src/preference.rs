//! User preferences: declared allergens and disliked tags.
//!
//! Values are stored exactly as supplied. Comparisons lowercase and trim
//! them on the fly.

use crate::normalise_token;

/// Allergens and dislikes declared by a user.
///
/// # Examples
/// ```
/// use menucast_core::UserPreference;
///
/// let pref = UserPreference::new()
///     .with_allergy("Shellfish ")
///     .with_dislike("Cilantro");
/// assert_eq!(pref.allergies(), ["Shellfish "]);
/// assert!(pref.normalised_dislikes().any(|d| d == "cilantro"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserPreference {
    #[cfg_attr(feature = "serde", serde(default))]
    allergies: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    dislikes: Vec<String>,
}

impl UserPreference {
    /// Construct a preference with no allergens or dislikes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct from raw lists.
    #[must_use]
    pub const fn from_lists(allergies: Vec<String>, dislikes: Vec<String>) -> Self {
        Self {
            allergies,
            dislikes,
        }
    }

    /// Add an allergen while returning `self` for chaining.
    #[must_use]
    pub fn with_allergy(mut self, allergen: &str) -> Self {
        self.allergies.push(allergen.to_owned());
        self
    }

    /// Add a disliked tag while returning `self` for chaining.
    #[must_use]
    pub fn with_dislike(mut self, tag: &str) -> Self {
        self.dislikes.push(tag.to_owned());
        self
    }

    /// Allergens as supplied.
    #[must_use]
    pub fn allergies(&self) -> &[String] {
        &self.allergies
    }

    /// Dislikes as supplied.
    #[must_use]
    pub fn dislikes(&self) -> &[String] {
        &self.dislikes
    }

    /// Lowercased, trimmed, non-empty allergens.
    pub fn normalised_allergies(&self) -> impl Iterator<Item = String> + '_ {
        normalised(&self.allergies)
    }

    /// Lowercased, trimmed, non-empty dislikes.
    pub fn normalised_dislikes(&self) -> impl Iterator<Item = String> + '_ {
        normalised(&self.dislikes)
    }

    /// Report whether the user declared nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalised_allergies().next().is_none() && self.normalised_dislikes().next().is_none()
    }
}

fn normalised(values: &[String]) -> impl Iterator<Item = String> + '_ {
    values
        .iter()
        .map(|value| normalise_token(value))
        .filter(|value| !value.is_empty())
}
