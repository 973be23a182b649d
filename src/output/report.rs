//! Screening report rendering (console and JSON)

use crate::classifier::TitlePrediction;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::extraction::{ResumeProfile, SkillSet};
use crate::matching::{Feedback, MatchResult, VerdictTier};
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Full screening outcome for one resume against one job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub resume_file: String,
    pub job_file: String,
    pub profile: ResumeProfile,
    pub jd_skills: SkillSet,
    pub result: MatchResult,
    pub feedback: Feedback,
    pub gap_suggestion: String,
    pub title_predictions: Vec<TitlePrediction>,
}

impl ScreeningReport {
    pub fn render(&self, format: &OutputFormat, color: bool) -> Result<String> {
        match format {
            OutputFormat::Console => Ok(self.render_console(color)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_console(&self, color: bool) -> String {
        if !color {
            colored::control::set_override(false);
        }

        let mut out = String::new();
        out.push_str(&format!("{}\n", "Screening Report".bold()));
        out.push_str(&format!("Resume: {}\n", self.resume_file));
        out.push_str(&format!("Job description: {}\n\n", self.job_file));

        out.push_str(&format!("{}\n", "Candidate".bold()));
        out.push_str(&format!(
            "  Name:       {}\n",
            self.profile.contact.name.as_deref().unwrap_or("None")
        ));
        out.push_str(&format!(
            "  Email:      {}\n",
            self.profile.contact.email.as_deref().unwrap_or("None")
        ));
        out.push_str(&format!(
            "  Phone:      {}\n",
            self.profile.contact.phone.as_deref().unwrap_or("None")
        ));
        out.push_str(&format!("  Experience: {}\n", self.profile.experience));
        out.push_str(&format!("  Skills:     {}\n\n", join_or_dash(&self.profile.skills)));

        let score_line = format!("{:.2}", self.result.score);
        let score_colored = match self.feedback.tier {
            VerdictTier::Strong => score_line.green().bold(),
            VerdictTier::Moderate => score_line.yellow().bold(),
            VerdictTier::Weak => score_line.red().bold(),
        };
        out.push_str(&format!("{}\n", "Match".bold()));
        out.push_str(&format!("  Score:   {} / 100\n", score_colored));
        out.push_str(&format!("  Matched: {}\n", join_or_dash(&self.result.matched_skills)));
        out.push_str(&format!("  {}\n", self.feedback.message));
        out.push_str(&format!("  {}\n\n", self.gap_suggestion));

        if !self.title_predictions.is_empty() {
            out.push_str(&format!("{}\n", "Predicted titles".bold()));
            for prediction in &self.title_predictions {
                out.push_str(&format!(
                    "  {} ({:.1}%)\n",
                    prediction.label, prediction.confidence
                ));
            }
        }

        out
    }
}

/// One-line-per-candidate summary for batch runs, sorted by descending score.
pub fn render_batch_summary(reports: &[ScreeningReport], color: bool) -> String {
    if !color {
        colored::control::set_override(false);
    }

    let mut ranked: Vec<&ScreeningReport> = reports.iter().collect();
    ranked.sort_by(|a, b| {
        b.result
            .score
            .partial_cmp(&a.result.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("Batch results ({} resumes)", reports.len()).bold()
    ));
    for report in ranked {
        out.push_str(&format!(
            "  {:>6.2}  {}  [{}]\n",
            report.result.score,
            report.resume_file,
            report.profile.experience
        ));
    }
    out
}

fn join_or_dash(skills: &SkillSet) -> String {
    if skills.is_empty() {
        "-".to_string()
    } else {
        skills.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::fields::{ContactInfo, ExperienceTier};
    use crate::matching::{generate_feedback, MatchStrategy};

    fn sample_report() -> ScreeningReport {
        let matched: SkillSet = ["python", "sql"].iter().copied().collect();
        let jd: SkillSet = ["python", "sql", "excel"].iter().copied().collect();
        let feedback = generate_feedback(66.67, &matched, &jd);

        ScreeningReport {
            resume_file: "resume.pdf".to_string(),
            job_file: "job.txt".to_string(),
            profile: ResumeProfile {
                contact: ContactInfo {
                    name: Some("John Doe".to_string()),
                    email: None,
                    phone: None,
                },
                skills: matched.clone(),
                experience: ExperienceTier::Senior,
            },
            jd_skills: jd,
            result: MatchResult {
                score: 66.67,
                matched_skills: matched,
                strategy: MatchStrategy::Exact,
                similarity_source: None,
            },
            feedback,
            gap_suggestion: "Consider learning: excel".to_string(),
            title_predictions: vec![],
        }
    }

    #[test]
    fn test_console_render_shows_degraded_fields() {
        let report = sample_report();
        let text = report.render(&OutputFormat::Console, false).unwrap();
        assert!(text.contains("66.67"));
        assert!(text.contains("Email:      None"));
        assert!(text.contains("Senior"));
        assert!(text.contains("Consider learning: excel"));
    }

    #[test]
    fn test_json_render_round_trips() {
        let report = sample_report();
        let json = report.render(&OutputFormat::Json, false).unwrap();
        let parsed: ScreeningReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.result.score, 66.67);
        assert_eq!(parsed.feedback.missing_skills, vec!["excel"]);
    }

    #[test]
    fn test_batch_summary_sorted_by_score() {
        let mut low = sample_report();
        low.resume_file = "low.pdf".to_string();
        low.result.score = 10.0;
        let high = sample_report();

        let summary = render_batch_summary(&[low, high], false);
        let high_pos = summary.find("resume.pdf").unwrap();
        let low_pos = summary.find("low.pdf").unwrap();
        assert!(high_pos < low_pos);
    }
}
