//! CLI interface for the resume screener

use crate::config::OutputFormat;
use crate::matching::MatchStrategy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Resume and job description matching tool for candidate screening")]
#[command(
    long_about = "Score resumes against a job description using exact keyword, semantic, or synonym-boosted matching, with feedback and skill-gap suggestions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one resume against a job description
    Match {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Matching strategy: exact, semantic, synonym
        #[arg(short, long)]
        strategy: Option<String>,

        /// Skill-score weight for the semantic strategy (0.0 to 1.0)
        #[arg(short, long)]
        weight: Option<f64>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Persist the result to the candidate store
        #[arg(long)]
        save: bool,
    },

    /// Score every resume in a directory against one job description
    Batch {
        /// Directory of resume files
        #[arg(short, long)]
        resumes: PathBuf,

        /// Path to job description file
        #[arg(short, long)]
        job: PathBuf,

        /// Matching strategy: exact, semantic, synonym
        #[arg(short, long)]
        strategy: Option<String>,

        /// Skill-score weight for the semantic strategy (0.0 to 1.0)
        #[arg(short, long)]
        weight: Option<f64>,
    },

    /// Review stored candidate records
    Candidates {
        #[command(subcommand)]
        action: CandidateAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum CandidateAction {
    /// List stored candidate records
    List {
        /// Show only starred candidates
        #[arg(long)]
        starred: bool,
    },

    /// Update reviewer notes and rating for a candidate
    Annotate {
        /// Resume filename (store key)
        filename: String,

        /// Reviewer notes
        #[arg(short, long, default_value = "")]
        notes: String,

        /// Rating from 0 to 5
        #[arg(short, long, default_value_t = 0)]
        rating: u8,
    },

    /// Toggle the starred flag for a candidate
    Star {
        /// Resume filename (store key)
        filename: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

/// Parse a strategy name, attaching the semantic weight where relevant
pub fn parse_strategy(name: &str, weight: Option<f64>) -> Result<MatchStrategy, String> {
    match name.to_lowercase().as_str() {
        "exact" => Ok(MatchStrategy::Exact),
        "semantic" => Ok(MatchStrategy::Semantic {
            skill_weight: weight.unwrap_or(0.5),
        }),
        "synonym" => Ok(MatchStrategy::Synonym),
        _ => Err(format!(
            "Invalid strategy: {}. Supported: exact, semantic, synonym",
            name
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
