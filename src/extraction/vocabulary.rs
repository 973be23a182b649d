//! Controlled skill vocabulary and synonym map

use crate::error::{Result, ScreenerError};
use crate::extraction::skills::SkillSet;
use aho_corasick::AhoCorasick;
use std::collections::HashMap;

/// Canonical skill phrases recognized by the screener.
const SKILL_PHRASES: &[&str] = &[
    "python",
    "java",
    "c++",
    "sql",
    "machine learning",
    "deep learning",
    "tensorflow",
    "keras",
    "pytorch",
    "nlp",
    "data science",
    "excel",
    "communication",
    "leadership",
    "project management",
    "fastapi",
    "flask",
    "django",
    "pandas",
    "numpy",
];

/// Controlled vocabulary with a single case-insensitive scan over the text.
///
/// A skill counts as present when its phrase occurs anywhere as a substring.
/// No token-boundary check is applied, so short phrases can false-positive
/// inside longer words (e.g. "nlp" embedded in an unrelated token). That is
/// the established detection policy and report consumers expect it.
pub struct Vocabulary {
    matcher: AhoCorasick,
    phrases: Vec<String>,
}

impl Vocabulary {
    /// Build the standard vocabulary.
    pub fn standard() -> Result<Self> {
        Self::with_phrases(SKILL_PHRASES.iter().map(|s| s.to_string()).collect())
    }

    /// Build a vocabulary from custom phrases (lowercased, deduplicated).
    pub fn with_phrases(mut phrases: Vec<String>) -> Result<Self> {
        for phrase in &mut phrases {
            *phrase = phrase.trim().to_lowercase();
        }
        phrases.sort();
        phrases.dedup();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&phrases)
            .map_err(|e| {
                ScreenerError::Configuration(format!("Failed to build vocabulary matcher: {}", e))
            })?;

        Ok(Self { matcher, phrases })
    }

    /// Extract every vocabulary phrase that occurs in the text.
    pub fn extract(&self, text: &str) -> SkillSet {
        let mut skills = SkillSet::new();
        for mat in self.matcher.find_overlapping_iter(text) {
            skills.insert(&self.phrases[mat.pattern()]);
        }
        skills
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Canonical skill term -> alternate surface forms. Used only by the
/// synonym-boosted strategy.
pub struct SynonymMap {
    map: HashMap<String, Vec<String>>,
}

impl SynonymMap {
    /// The standard synonym table.
    pub fn standard() -> Self {
        let mut map = HashMap::new();
        map.insert(
            "communication".to_string(),
            vec!["presentation".to_string(), "writing".to_string(), "speaking".to_string()],
        );
        map.insert(
            "leadership".to_string(),
            vec!["management".to_string(), "supervision".to_string(), "mentoring".to_string()],
        );
        map.insert(
            "python".to_string(),
            vec!["python3".to_string(), "python 3".to_string()],
        );
        map.insert(
            "sql".to_string(),
            vec!["database".to_string(), "mysql".to_string(), "postgres".to_string()],
        );
        Self { map }
    }

    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn insert(&mut self, canonical: &str, alternates: Vec<String>) {
        self.map.insert(canonical.trim().to_lowercase(), alternates);
    }

    pub fn alternates(&self, term: &str) -> Option<&[String]> {
        self.map.get(&term.trim().to_lowercase()).map(|v| v.as_slice())
    }

    /// Union every listed synonym of every skill into the set. Expansion only
    /// adds terms, it never removes any.
    pub fn expand(&self, skills: &SkillSet) -> SkillSet {
        let mut boosted = skills.clone();
        for skill in skills.iter() {
            if let Some(alternates) = self.alternates(skill) {
                for alt in alternates {
                    boosted.insert(alt);
                }
            }
        }
        boosted
    }
}
