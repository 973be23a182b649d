//! Structured field extraction: contact info and experience level

use crate::extraction::skills::SkillSet;
use crate::extraction::vocabulary::Vocabulary;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+").unwrap())
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Permissive by design: optional country code, optional parenthesized
    // area code, two digit groups. May false-positive on unrelated digit
    // sequences; treated as best-effort, never validated.
    RE.get_or_init(|| {
        Regex::new(r"(\+?\d{1,4}[\s-]?)?(\(?\d{2,4}\)?[\s-]?)?\d{3,4}[\s-]?\d{4}").unwrap()
    })
}

fn years_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*\+?\s*years?").unwrap())
}

/// Best-effort contact fields pulled from resume text. Absent fields stay
/// `None` and render as such; extraction never fails outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Coarse experience classification from stated years of experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceTier {
    Junior,
    MidLevel,
    Senior,
    Unknown,
}

impl fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExperienceTier::Junior => "Junior",
            ExperienceTier::MidLevel => "Mid-Level",
            ExperienceTier::Senior => "Senior",
            ExperienceTier::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

/// Structured record extracted from a single resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub contact: ContactInfo,
    pub skills: SkillSet,
    pub experience: ExperienceTier,
}

/// Entity-recognition collaborator for person-name detection. Treated as a
/// black box returning zero or more candidate names.
pub trait EntityRecognizer {
    fn person_names(&self, text: &str) -> Vec<String>;
}

/// Header-scan heuristic: the first short line near the top of the document
/// made of two or three capitalized words, with no digits or address-like
/// characters, is taken as the candidate's name.
#[derive(Debug, Default)]
pub struct HeuristicNameRecognizer;

impl EntityRecognizer for HeuristicNameRecognizer {
    fn person_names(&self, text: &str) -> Vec<String> {
        text.lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .take(10)
            .filter(|line| looks_like_name(line))
            .map(|line| line.to_string())
            .collect()
    }
}

fn looks_like_name(line: &str) -> bool {
    if line.len() > 60 || line.contains('@') || line.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 2 || words.len() > 3 {
        return false;
    }
    words.iter().all(|word| {
        let mut chars = word.chars();
        matches!(chars.next(), Some(first) if first.is_uppercase())
            && chars.all(|c| c.is_alphabetic() || c == '-' || c == '\'')
    })
}

/// First email-shaped match in the text, if any.
pub fn extract_email(text: &str) -> Option<String> {
    email_regex().find(text).map(|m| m.as_str().to_string())
}

/// First phone-shaped match in the text, if any.
pub fn extract_phone(text: &str) -> Option<String> {
    phone_regex()
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// First person entity found by the recognizer, if any.
pub fn extract_name(text: &str, recognizer: &dyn EntityRecognizer) -> Option<String> {
    recognizer.person_names(text).into_iter().next()
}

/// Classify experience from every "<n> years" / "<n>+ years" mention,
/// taking the maximum. Pure function of the text, independent of skills.
pub fn classify_experience(text: &str) -> ExperienceTier {
    let max_years = years_regex()
        .captures_iter(text)
        .filter_map(|cap| cap[1].parse::<u32>().ok())
        .max();

    match max_years {
        None => ExperienceTier::Unknown,
        Some(years) if years < 2 => ExperienceTier::Junior,
        Some(years) if years < 5 => ExperienceTier::MidLevel,
        Some(_) => ExperienceTier::Senior,
    }
}

/// Full structured extraction for a resume. Empty text degrades to an empty
/// skill set and all-None contact fields.
pub fn extract_resume_profile(
    text: &str,
    vocabulary: &Vocabulary,
    recognizer: &dyn EntityRecognizer,
) -> ResumeProfile {
    ResumeProfile {
        contact: ContactInfo {
            name: extract_name(text, recognizer),
            email: extract_email(text),
            phone: extract_phone(text),
        },
        skills: vocabulary.extract(text),
        experience: classify_experience(text),
    }
}
