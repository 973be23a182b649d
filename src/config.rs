//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub similarity: SimilarityConfig,
    pub matching: MatchingConfig,
    pub classifier: ClassifierConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Remote embedding endpoint (sentence-embedding inference API)
    pub endpoint_url: String,
    /// Environment variable holding the API token; no token means the remote
    /// path is skipped and the lexical fallback is used directly
    pub api_token_env: String,
    /// Per-request timeout; a timeout counts as a remote failure
    pub request_timeout_secs: u64,
    /// Inputs are truncated to this many characters before embedding
    pub max_input_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Default strategy for `match`/`batch` when none is given on the CLI
    pub default_strategy: String,
    /// Skill-score weight for the semantic strategy, in [0,1]
    pub skill_weight: f64,
    /// Term-similarity threshold for the synonym strategy, in [0,1]
    pub term_match_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Frozen title-classifier artifact; load failure is fatal at startup
    pub artifact_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Candidate record store (JSON file keyed by resume filename)
    pub results_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("resume-screener");

        Self {
            similarity: SimilarityConfig {
                endpoint_url:
                    "https://api-inference.huggingface.co/models/sentence-transformers/all-MiniLM-L6-v2"
                        .to_string(),
                api_token_env: "HF_API_TOKEN".to_string(),
                request_timeout_secs: 20,
                max_input_chars: 1000,
            },
            matching: MatchingConfig {
                default_strategy: "exact".to_string(),
                skill_weight: 0.5,
                term_match_threshold: 0.75,
            },
            classifier: ClassifierConfig {
                artifact_path: PathBuf::from("assets/title_model.json"),
            },
            storage: StorageConfig {
                results_path: data_dir.join("candidates.json"),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }
}
