//! Normalized skill sets

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of normalized skill terms.
///
/// Terms are lowercased and deduplicated. Backed by a `BTreeSet` so iteration
/// order is deterministic, which keeps missing-skill lists and report output
/// stable for a given input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, term: &str) {
        self.0.insert(term.trim().to_lowercase());
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(&term.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    /// Terms present in both sets
    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    /// Terms in `self` that are absent from `other`
    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    pub fn union(&self, other: &SkillSet) -> SkillSet {
        Self(self.0.union(&other.0).cloned().collect())
    }

    pub fn is_subset(&self, other: &SkillSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Space-joined term list, used as similarity-provider input
    pub fn join(&self, sep: &str) -> String {
        self.0.iter().cloned().collect::<Vec<_>>().join(sep)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl FromIterator<String> for SkillSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for term in iter {
            set.insert(&term);
        }
        set
    }
}

impl<'a> FromIterator<&'a str> for SkillSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(|s| s.to_string()).collect()
    }
}
