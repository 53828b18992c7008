//! Allergy and dislike filtering.
//!
//! Allergens are expanded through curated synonym groups before they are
//! compared with a candidate's tags. Matching is bidirectional: a tag that
//! contains the token, or a token that contains the tag, both count. Any
//! allergen match forbids the candidate outright.
//!
//! Dislikes are a softer signal. They use an exact comparison without
//! synonym expansion and, under the default [`DislikePolicy::Demote`], only
//! mark the candidate so the scorer can push it to the bottom.

use crate::{TagSet, UserPreference, normalise_token};

/// Curated allergen synonym groups.
///
/// # Examples
/// ```
/// use menucast_core::AllergenHints;
///
/// let hints = AllergenHints::new().with_group(["shellfish", "갑각류", "crab", "shrimp", "lobster"]);
/// let expanded = hints.expand("Shellfish");
/// assert!(expanded.contains(&"shrimp".to_owned()));
/// assert!(expanded.contains(&"갑각류".to_owned()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllergenHints {
    groups: Vec<Vec<String>>,
}

impl AllergenHints {
    /// Construct an empty hint table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a synonym group. Blank members are dropped; empty groups are
    /// ignored.
    pub fn insert_group<I, S>(&mut self, members: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut group: Vec<String> = Vec::new();
        for member in members {
            let token = normalise_token(member.as_ref());
            if !token.is_empty() && !group.contains(&token) {
                group.push(token);
            }
        }
        if group.is_empty() {
            log::warn!("ignoring empty allergen synonym group");
            return;
        }
        self.groups.push(group);
    }

    /// Add a group while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_group<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.insert_group(members);
        self
    }

    /// Number of synonym groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Report whether no group is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Expand an allergen into itself plus the members of every group it
    /// hits. A group is hit when any member equals, contains or is contained
    /// in the allergen.
    #[must_use]
    pub fn expand(&self, allergen: &str) -> Vec<String> {
        let token = normalise_token(allergen);
        if token.is_empty() {
            return Vec::new();
        }
        let mut expanded = vec![token.clone()];
        for group in &self.groups {
            if group.iter().any(|member| overlaps(member, &token)) {
                for member in group {
                    if !expanded.contains(member) {
                        expanded.push(member.clone());
                    }
                }
            }
        }
        expanded
    }
}

/// Bidirectional substring test on normalised, non-empty tokens.
fn overlaps(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a == b || a.contains(b) || b.contains(a))
}

/// What to do with a candidate carrying a disliked tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DislikePolicy {
    /// Keep the candidate but force a near-zero score.
    #[default]
    Demote,
    /// Drop the candidate like an allergen match.
    Exclude,
}

/// Filtering outcome for a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing conflicts.
    Allowed,
    /// A disliked tag is present.
    Disliked {
        /// The offending tag.
        tag: String,
    },
    /// An allergen conflicts; the candidate must be removed.
    Forbidden {
        /// The user's allergen token.
        allergen: String,
        /// The tag it matched.
        tag: String,
    },
}

/// Allergy/dislike predicate bound to a hint table and policy.
///
/// The filter is side-effect free and total: empty preferences or tag sets
/// simply yield [`Verdict::Allowed`].
///
/// # Examples
/// ```
/// use menucast_core::{AllergenHints, DislikePolicy, PreferenceFilter, TagSet, UserPreference};
///
/// let hints = AllergenHints::new().with_group(["shellfish", "crab", "shrimp"]);
/// let filter = PreferenceFilter::new(&hints, DislikePolicy::Demote);
/// let pref = UserPreference::new().with_allergy("shellfish");
///
/// assert!(filter.is_forbidden(&pref, &TagSet::from_raw(["shrimp", "warm"])));
/// assert!(!filter.is_forbidden(&pref, &TagSet::from_raw(["soup"])));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PreferenceFilter<'a> {
    hints: &'a AllergenHints,
    policy: DislikePolicy,
}

impl<'a> PreferenceFilter<'a> {
    /// Bind a filter to a hint table and dislike policy.
    #[must_use]
    pub const fn new(hints: &'a AllergenHints, policy: DislikePolicy) -> Self {
        Self { hints, policy }
    }

    /// Classify `tags` against the user's preferences.
    ///
    /// Allergens are checked first; the first match wins.
    #[must_use]
    pub fn verdict(&self, pref: &UserPreference, tags: &TagSet) -> Verdict {
        if let Some((allergen, tag)) = self.allergen_conflict(pref, tags) {
            return Verdict::Forbidden { allergen, tag };
        }
        let Some(tag) = disliked_tag(pref, tags) else {
            return Verdict::Allowed;
        };
        match self.policy {
            DislikePolicy::Demote => Verdict::Disliked { tag },
            DislikePolicy::Exclude => Verdict::Forbidden {
                allergen: tag.clone(),
                tag,
            },
        }
    }

    /// Report whether the candidate must be removed.
    #[must_use]
    pub fn is_forbidden(&self, pref: &UserPreference, tags: &TagSet) -> bool {
        matches!(self.verdict(pref, tags), Verdict::Forbidden { .. })
    }

    /// Report whether any tag is disliked, regardless of policy.
    #[must_use]
    pub fn is_disliked(&self, pref: &UserPreference, tags: &TagSet) -> bool {
        disliked_tag(pref, tags).is_some()
    }

    /// Return the first `(allergen, tag)` pair that conflicts, ignoring
    /// dislikes.
    #[must_use]
    pub fn allergen_conflict(
        &self,
        pref: &UserPreference,
        tags: &TagSet,
    ) -> Option<(String, String)> {
        for allergen in pref.normalised_allergies() {
            for token in self.hints.expand(&allergen) {
                if let Some(tag) = tags.names().find(|tag| overlaps(tag, &token)) {
                    return Some((allergen, tag.to_owned()));
                }
            }
        }
        None
    }
}

fn disliked_tag(pref: &UserPreference, tags: &TagSet) -> Option<String> {
    pref.normalised_dislikes()
        .find_map(|dislike| tags.names().find(|tag| *tag == dislike).map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hints() -> AllergenHints {
        AllergenHints::new()
            .with_group(["shellfish", "갑각류", "crab", "shrimp", "lobster"])
            .with_group(["peanut", "땅콩"])
    }

    #[rstest]
    #[case("shellfish", &["shellfish", "warm"], true)]
    #[case("Shellfish ", &["lobster"], true)]
    #[case("갑각류", &["crab"], true)]
    #[case("shrimp", &["king shrimp"], true)]
    #[case("peanut butter", &["땅콩"], true)]
    #[case("shellfish", &["soup", "warm"], false)]
    #[case("", &["shellfish"], false)]
    #[case("peanut", &[], false)]
    fn allergen_matching(
        hints: AllergenHints,
        #[case] allergen: &str,
        #[case] tags: &[&str],
        #[case] forbidden: bool,
    ) {
        let filter = PreferenceFilter::new(&hints, DislikePolicy::Demote);
        let pref = UserPreference::new().with_allergy(allergen);
        assert_eq!(filter.is_forbidden(&pref, &TagSet::from_raw(tags)), forbidden);
    }

    #[rstest]
    fn soft_marker_is_ignored_when_matching(hints: AllergenHints) {
        let filter = PreferenceFilter::new(&hints, DislikePolicy::Demote);
        let pref = UserPreference::new().with_allergy("crab");
        assert!(filter.is_forbidden(&pref, &TagSet::from_raw(["crab~"])));
    }

    #[rstest]
    fn dislikes_demote_by_default(hints: AllergenHints) {
        let filter = PreferenceFilter::new(&hints, DislikePolicy::Demote);
        let pref = UserPreference::new().with_dislike("Spicy");
        let verdict = filter.verdict(&pref, &TagSet::from_raw(["spicy", "soup"]));
        assert_eq!(
            verdict,
            Verdict::Disliked {
                tag: "spicy".to_owned()
            }
        );
    }

    #[rstest]
    fn dislikes_do_not_expand_synonyms(hints: AllergenHints) {
        let filter = PreferenceFilter::new(&hints, DislikePolicy::Demote);
        let pref = UserPreference::new().with_dislike("shellfish");
        assert!(!filter.is_disliked(&pref, &TagSet::from_raw(["crab"])));
    }

    #[rstest]
    fn exclude_policy_forbids_dislikes(hints: AllergenHints) {
        let filter = PreferenceFilter::new(&hints, DislikePolicy::Exclude);
        let pref = UserPreference::new().with_dislike("spicy");
        assert!(filter.is_forbidden(&pref, &TagSet::from_raw(["spicy"])));
    }

    #[rstest]
    fn allergens_outrank_dislikes(hints: AllergenHints) {
        let filter = PreferenceFilter::new(&hints, DislikePolicy::Demote);
        let pref = UserPreference::new()
            .with_dislike("warm")
            .with_allergy("shellfish");
        let verdict = filter.verdict(&pref, &TagSet::from_raw(["warm", "crab"]));
        assert!(matches!(verdict, Verdict::Forbidden { .. }));
    }

    #[test]
    fn empty_hint_table_still_matches_directly() {
        let hints = AllergenHints::new();
        let filter = PreferenceFilter::new(&hints, DislikePolicy::Demote);
        let pref = UserPreference::new().with_allergy("egg");
        assert!(filter.is_forbidden(&pref, &TagSet::from_raw(["egg"])));
        assert!(!filter.is_forbidden(&pref, &TagSet::from_raw(["crab"])));
    }

    #[test]
    fn blank_groups_are_dropped() {
        let hints = AllergenHints::new().with_group(["  ", ""]);
        assert!(hints.is_empty());
    }
}
