//! Matching and scoring engine

pub mod similarity;
pub mod scoring;
pub mod feedback;

pub use feedback::{generate_feedback, skill_gap_suggestion, Feedback, VerdictTier};
pub use scoring::{MatchResult, MatchStrategy, ScoringEngine};
pub use similarity::{SimilarityProvider, SimilarityScore, SimilaritySource};
