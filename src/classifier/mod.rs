//! Frozen job-title classification artifact
//!
//! The artifact is a (vocabulary, linear classifier, label list) triple
//! produced by an offline training script and consumed read-only at
//! inference time. It is loaded once at process start; a missing or corrupt
//! artifact is fatal because confidence scores from a broken model would be
//! meaningless.

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// On-disk artifact layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleArtifact {
    /// Label names, one per classifier output
    pub labels: Vec<String>,
    /// Term -> column index into each weight row
    pub vocabulary: HashMap<String, usize>,
    /// One weight row per label, `vocabulary.len()` columns each
    pub weights: Vec<Vec<f64>>,
    /// One bias per label
    pub bias: Vec<f64>,
}

/// A ranked title guess with confidence in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitlePrediction {
    pub label: String,
    pub confidence: f64,
}

/// Title predictor backed by a frozen artifact. Read-only after load.
pub struct TitlePredictor {
    artifact: TitleArtifact,
}

const TOP_PREDICTIONS: usize = 3;

impl TitlePredictor {
    /// Load and validate the artifact. Any failure here must abort startup.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScreenerError::ModelLoading(format!(
                "Failed to read classifier artifact '{}': {}",
                path.display(),
                e
            ))
        })?;
        let artifact: TitleArtifact = serde_json::from_str(&content).map_err(|e| {
            ScreenerError::ModelLoading(format!(
                "Failed to parse classifier artifact '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: TitleArtifact) -> Result<Self> {
        if artifact.labels.is_empty() {
            return Err(ScreenerError::ModelLoading(
                "Classifier artifact has no labels".to_string(),
            ));
        }
        if artifact.weights.len() != artifact.labels.len()
            || artifact.bias.len() != artifact.labels.len()
        {
            return Err(ScreenerError::ModelLoading(format!(
                "Classifier artifact shape mismatch: {} labels, {} weight rows, {} biases",
                artifact.labels.len(),
                artifact.weights.len(),
                artifact.bias.len()
            )));
        }
        let vocab_size = artifact.vocabulary.len();
        if artifact.weights.iter().any(|row| row.len() != vocab_size) {
            return Err(ScreenerError::ModelLoading(format!(
                "Classifier weight rows must have {} columns",
                vocab_size
            )));
        }

        Ok(Self { artifact })
    }

    pub fn labels(&self) -> &[String] {
        &self.artifact.labels
    }

    /// Rank job titles for the text, top 3 by descending confidence.
    /// Blank text yields a single Unknown prediction at zero confidence.
    pub fn predict(&self, text: &str) -> Vec<TitlePrediction> {
        if text.trim().is_empty() {
            return vec![TitlePrediction {
                label: "Unknown".to_string(),
                confidence: 0.0,
            }];
        }

        let counts = token_counts(text);
        let scores: Vec<f64> = self
            .artifact
            .labels
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let row = &self.artifact.weights[i];
                let dot: f64 = counts
                    .iter()
                    .filter_map(|(term, &count)| {
                        self.artifact.vocabulary.get(term).map(|&col| row[col] * count as f64)
                    })
                    .sum();
                dot + self.artifact.bias[i]
            })
            .collect();

        let probabilities = softmax(&scores);
        let mut ranked: Vec<TitlePrediction> = self
            .artifact
            .labels
            .iter()
            .zip(probabilities)
            .map(|(label, p)| TitlePrediction {
                label: label.clone(),
                confidence: (p * 10_000.0).round() / 100.0,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(TOP_PREDICTIONS);
        ranked
    }
}

fn token_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        *counts.entry(token.to_lowercase()).or_insert(0) += 1;
    }
    counts
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
