//! Match scoring strategies

use crate::extraction::skills::SkillSet;
use crate::extraction::vocabulary::SynonymMap;
use crate::matching::similarity::{round2, SimilarityProvider, SimilaritySource};
use serde::{Deserialize, Serialize};

/// Scoring strategy selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MatchStrategy {
    /// Set intersection over canonical skill terms
    Exact,
    /// Blend of the exact skill score and whole-text similarity of the
    /// joined skill lists; `skill_weight` is clamped to [0,1]
    Semantic { skill_weight: f64 },
    /// Synonym-expanded greedy term matching
    Synonym,
}

/// Outcome of one scoring call. Immutable; callers decide whether to persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Match score in [0, 100], rounded to 2 decimals
    pub score: f64,
    /// Matched job-description skills; always a subset of the jd skill set
    pub matched_skills: SkillSet,
    pub strategy: MatchStrategy,
    /// Which similarity backend served the semantic sub-score, when one ran
    pub similarity_source: Option<SimilaritySource>,
}

/// Scoring engine combining extracted skill sets into a bounded match score.
///
/// Holds no mutable state; safe to share across concurrent scoring calls.
pub struct ScoringEngine {
    provider: SimilarityProvider,
    synonyms: SynonymMap,
    term_threshold: f64,
}

impl ScoringEngine {
    pub fn new(provider: SimilarityProvider, synonyms: SynonymMap) -> Self {
        Self {
            provider,
            synonyms,
            term_threshold: 0.75,
        }
    }

    pub fn with_term_threshold(mut self, threshold: f64) -> Self {
        self.term_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Score resume skills against job-description skills under the given
    /// strategy. Empty inputs on either side always yield score 0 with no
    /// matches; no strategy ever divides by an empty set.
    pub async fn score(
        &self,
        resume_skills: &SkillSet,
        jd_skills: &SkillSet,
        strategy: MatchStrategy,
    ) -> MatchResult {
        match strategy {
            MatchStrategy::Exact => {
                let (score, matched) = Self::exact_match(resume_skills, jd_skills);
                MatchResult {
                    score,
                    matched_skills: matched,
                    strategy,
                    similarity_source: None,
                }
            }
            MatchStrategy::Semantic { skill_weight } => {
                self.semantic_match(resume_skills, jd_skills, skill_weight).await
            }
            MatchStrategy::Synonym => {
                let (score, matched) = self.synonym_boosted_match(resume_skills, jd_skills);
                MatchResult {
                    score,
                    matched_skills: matched,
                    strategy,
                    similarity_source: None,
                }
            }
        }
    }

    /// Exact keyword match: `100 * |resume ∩ jd| / |jd|`.
    pub fn exact_match(resume_skills: &SkillSet, jd_skills: &SkillSet) -> (f64, SkillSet) {
        if resume_skills.is_empty() || jd_skills.is_empty() {
            return (0.0, SkillSet::new());
        }
        let matched = resume_skills.intersection(jd_skills);
        let score = (matched.len() as f64 / jd_skills.len() as f64) * 100.0;
        (round2(score), matched)
    }

    async fn semantic_match(
        &self,
        resume_skills: &SkillSet,
        jd_skills: &SkillSet,
        skill_weight: f64,
    ) -> MatchResult {
        let (skill_score, matched) = Self::exact_match(resume_skills, jd_skills);
        if resume_skills.is_empty() || jd_skills.is_empty() {
            return MatchResult {
                score: 0.0,
                matched_skills: matched,
                strategy: MatchStrategy::Semantic { skill_weight },
                similarity_source: None,
            };
        }

        // Similarity over the joined skill lists, not the raw document text.
        let semantic = self
            .provider
            .similarity(&resume_skills.join(" "), &jd_skills.join(" "))
            .await;

        let w = skill_weight.clamp(0.0, 1.0);
        let score = round2(w * skill_score + (1.0 - w) * semantic.score);

        MatchResult {
            score,
            matched_skills: matched,
            strategy: MatchStrategy::Semantic { skill_weight: w },
            similarity_source: Some(semantic.source),
        }
    }

    /// Synonym-boosted greedy matching: expand the resume set through the
    /// synonym map, then match each jd skill against the boosted terms; the
    /// first pairing at or above the threshold wins.
    fn synonym_boosted_match(
        &self,
        resume_skills: &SkillSet,
        jd_skills: &SkillSet,
    ) -> (f64, SkillSet) {
        if resume_skills.is_empty() || jd_skills.is_empty() {
            return (0.0, SkillSet::new());
        }

        let boosted = self.synonyms.expand(resume_skills);
        let mut matched = SkillSet::new();

        for jd_skill in jd_skills.iter() {
            for resume_skill in boosted.iter() {
                if self.provider.term_similarity(resume_skill, jd_skill) >= self.term_threshold {
                    matched.insert(jd_skill);
                    break;
                }
            }
        }

        let score = (matched.len() as f64 / jd_skills.len() as f64) * 100.0;
        (round2(score), matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::vocabulary::SynonymMap;
    use crate::matching::similarity::SimilarityProvider;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(SimilarityProvider::lexical_only(), SynonymMap::standard())
    }

    fn skills(terms: &[&str]) -> SkillSet {
        terms.iter().copied().collect()
    }

    #[test]
    fn test_exact_match_reference_scenario() {
        let resume = skills(&["python", "sql", "communication"]);
        let jd = skills(&["python", "sql", "excel"]);
        let (score, matched) = ScoringEngine::exact_match(&resume, &jd);
        assert_eq!(score, 66.67);
        assert_eq!(matched.to_vec(), vec!["python", "sql"]);
    }

    #[test]
    fn test_exact_match_empty_inputs() {
        let some = skills(&["python"]);
        let empty = SkillSet::new();

        let (score, matched) = ScoringEngine::exact_match(&empty, &some);
        assert_eq!(score, 0.0);
        assert!(matched.is_empty());

        let (score, matched) = ScoringEngine::exact_match(&some, &empty);
        assert_eq!(score, 0.0);
        assert!(matched.is_empty());

        let (score, _) = ScoringEngine::exact_match(&empty, &empty);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_exact_self_match_is_perfect() {
        let set = skills(&["python", "sql", "leadership"]);
        let (score, matched) = ScoringEngine::exact_match(&set, &set);
        assert_eq!(score, 100.0);
        assert_eq!(matched, set);
    }

    #[test]
    fn test_exact_matched_is_subset_of_jd() {
        let resume = skills(&["python", "java", "excel", "nlp"]);
        let jd = skills(&["python", "sql"]);
        let (_, matched) = ScoringEngine::exact_match(&resume, &jd);
        assert!(matched.is_subset(&jd));
    }

    #[tokio::test]
    async fn test_semantic_blend_with_weight() {
        let engine = engine();
        let resume = skills(&["python", "sql"]);
        let jd = skills(&["python", "sql"]);

        // Identical skill lists: skill score 100, lexical similarity 100.
        let result = engine
            .score(&resume, &jd, MatchStrategy::Semantic { skill_weight: 0.5 })
            .await;
        assert_eq!(result.score, 100.0);
        assert_eq!(result.similarity_source, Some(SimilaritySource::LexicalFallback));
        assert!(result.matched_skills.is_subset(&jd));
    }

    #[tokio::test]
    async fn test_semantic_weight_one_equals_exact() {
        let engine = engine();
        let resume = skills(&["python", "sql", "communication"]);
        let jd = skills(&["python", "sql", "excel"]);

        let semantic = engine
            .score(&resume, &jd, MatchStrategy::Semantic { skill_weight: 1.0 })
            .await;
        let (exact_score, _) = ScoringEngine::exact_match(&resume, &jd);
        assert_eq!(semantic.score, exact_score);
    }

    #[tokio::test]
    async fn test_semantic_empty_inputs() {
        let engine = engine();
        let result = engine
            .score(&SkillSet::new(), &skills(&["python"]), MatchStrategy::Semantic {
                skill_weight: 0.5,
            })
            .await;
        assert_eq!(result.score, 0.0);
        assert!(result.matched_skills.is_empty());
        assert!(result.similarity_source.is_none());
    }

    #[test]
    fn test_synonym_boosted_reference_scenario() {
        let engine = engine();
        let resume = skills(&["leadership"]);
        let jd = skills(&["management"]);
        let (score, matched) = engine.synonym_boosted_match(&resume, &jd);
        assert_eq!(score, 100.0);
        assert!(matched.contains("management"));
    }

    #[test]
    fn test_synonym_matched_is_jd_side() {
        let engine = engine();
        let resume = skills(&["leadership", "python"]);
        let jd = skills(&["management", "python3", "excel"]);
        let (_, matched) = engine.synonym_boosted_match(&resume, &jd);
        assert!(matched.is_subset(&jd));
        assert!(matched.contains("management"));
        assert!(matched.contains("python3"));
        assert!(!matched.contains("excel"));
    }

    #[test]
    fn test_synonym_never_fewer_matches_than_exact() {
        let engine = engine();
        let cases: Vec<(SkillSet, SkillSet)> = vec![
            (skills(&["python", "sql"]), skills(&["python", "sql", "excel"])),
            (skills(&["leadership"]), skills(&["management"])),
            (skills(&["java"]), skills(&["python"])),
            (SkillSet::new(), skills(&["python"])),
        ];

        for (resume, jd) in cases {
            let (_, exact_matched) = ScoringEngine::exact_match(&resume, &jd);
            let (_, synonym_matched) = engine.synonym_boosted_match(&resume, &jd);
            assert!(
                synonym_matched.len() >= exact_matched.len(),
                "expansion removed matches for {:?} vs {:?}",
                resume,
                jd
            );
        }
    }

    #[test]
    fn test_synonym_empty_inputs() {
        let engine = engine();
        let (score, matched) = engine.synonym_boosted_match(&SkillSet::new(), &SkillSet::new());
        assert_eq!(score, 0.0);
        assert!(matched.is_empty());
    }
}
