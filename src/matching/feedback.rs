//! Qualitative feedback and skill-gap suggestions

use crate::extraction::skills::SkillSet;
use serde::{Deserialize, Serialize};

/// How many missing skills are surfaced in messages. The underlying missing
/// set is unbounded; the cap is presentation only.
const MISSING_DISPLAY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictTier {
    Strong,
    Moderate,
    Weak,
}

/// Human-readable verdict for one match result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub tier: VerdictTier,
    pub message: String,
    /// At most five missing jd skills, in deterministic (sorted) order;
    /// always disjoint from the matched set
    pub missing_skills: Vec<String>,
}

/// Map a score plus skill sets to a qualitative verdict. Tier lower bounds
/// are inclusive: 80 is Strong, 50 is Moderate.
pub fn generate_feedback(score: f64, matched_skills: &SkillSet, jd_skills: &SkillSet) -> Feedback {
    let missing: Vec<String> = jd_skills
        .difference(matched_skills)
        .iter()
        .take(MISSING_DISPLAY_LIMIT)
        .cloned()
        .collect();

    let tier = if score >= 80.0 {
        VerdictTier::Strong
    } else if score >= 50.0 {
        VerdictTier::Moderate
    } else {
        VerdictTier::Weak
    };

    let mut message = match tier {
        VerdictTier::Strong => "Strong match. Candidate is well-aligned.".to_string(),
        VerdictTier::Moderate => "Moderate match. Some key skills are missing.".to_string(),
        VerdictTier::Weak => "Weak match. Candidate lacks several required skills.".to_string(),
    };

    if !missing.is_empty() {
        message.push_str(&format!(" Missing: {}", missing.join(", ")));
    }

    Feedback {
        tier,
        message,
        missing_skills: missing,
    }
}

/// Learning-tip message for report views. Distinguishes "no requirements
/// listed" from "all requirements met".
pub fn skill_gap_suggestion(resume_skills: &SkillSet, jd_skills: &SkillSet) -> String {
    if jd_skills.is_empty() {
        return "No job description skills provided.".to_string();
    }

    let missing = jd_skills.difference(resume_skills);
    if missing.is_empty() {
        return "No major skill gaps detected.".to_string();
    }

    let listed: Vec<String> = missing.iter().take(MISSING_DISPLAY_LIMIT).cloned().collect();
    format!("Consider learning: {}", listed.join(", "))
}
