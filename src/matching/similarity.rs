//! Text similarity: remote embeddings with a local lexical fallback

use crate::config::SimilarityConfig;
use crate::error::{Result, ScreenerError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Similarity between two text spans, scaled to [0, 100].
///
/// `source` records which backend produced the number so degraded results
/// stay distinguishable from genuine low similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub score: f64,
    pub source: SimilaritySource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilaritySource {
    RemoteEmbedding,
    LexicalFallback,
}

/// Similarity provider with two backends behind one signature.
///
/// The remote embedding service is tried first when credentials are present;
/// any failure (missing token, timeout, non-2xx, malformed response) falls
/// back one-shot to the local lexical model. Callers always get a score in
/// [0, 100] and this call never errors.
pub struct SimilarityProvider {
    remote: Option<EmbeddingClient>,
    max_input_chars: usize,
}

impl SimilarityProvider {
    pub fn new(config: &SimilarityConfig) -> Self {
        let remote = match std::env::var(&config.api_token_env) {
            Ok(token) if !token.is_empty() => {
                EmbeddingClient::new(&config.endpoint_url, token, config.request_timeout_secs)
            }
            _ => {
                debug!(
                    "No embedding API token in {}; using lexical similarity only",
                    config.api_token_env
                );
                None
            }
        };

        Self {
            remote,
            max_input_chars: config.max_input_chars,
        }
    }

    /// Provider with the remote path disabled; useful for tests and offline
    /// runs.
    pub fn lexical_only() -> Self {
        Self {
            remote: None,
            max_input_chars: 1000,
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Whole-text similarity in [0, 100], rounded to 2 decimals.
    pub async fn similarity(&self, text_a: &str, text_b: &str) -> SimilarityScore {
        if let Some(client) = &self.remote {
            match self.remote_similarity(client, text_a, text_b).await {
                Ok(score) => {
                    return SimilarityScore {
                        score,
                        source: SimilaritySource::RemoteEmbedding,
                    };
                }
                Err(e) => {
                    warn!("Remote embedding failed, falling back to lexical similarity: {}", e);
                }
            }
        }

        SimilarityScore {
            score: round2(lexical_similarity(text_a, text_b) * 100.0),
            source: SimilaritySource::LexicalFallback,
        }
    }

    /// Term-level similarity for short phrases, in [0, 1]. Computed locally:
    /// normalized equality first, Jaro-Winkler otherwise.
    pub fn term_similarity(&self, term_a: &str, term_b: &str) -> f64 {
        let a = term_a.trim().to_lowercase();
        let b = term_b.trim().to_lowercase();
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        if a == b {
            return 1.0;
        }
        strsim::jaro_winkler(&a, &b)
    }

    async fn remote_similarity(
        &self,
        client: &EmbeddingClient,
        text_a: &str,
        text_b: &str,
    ) -> Result<f64> {
        let emb_a = client.embed(&prepare_input(text_a, self.max_input_chars)).await?;
        let emb_b = client.embed(&prepare_input(text_b, self.max_input_chars)).await?;
        Ok(round2(cosine_similarity(&emb_a, &emb_b) * 100.0))
    }
}

/// HTTP client for the remote embedding service.
struct EmbeddingClient {
    client: reqwest::Client,
    url: String,
    token: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    inputs: &'a str,
}

impl EmbeddingClient {
    fn new(url: &str, token: String, timeout_secs: u64) -> Option<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .ok()?;
        Some(Self {
            client,
            url: url.to_string(),
            token,
        })
    }

    async fn embed(&self, text: &str) -> Result<Vec<f64>> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&EmbeddingRequest { inputs: text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScreenerError::Embedding(format!(
                "Embedding endpoint returned status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await?;
        parse_embedding(&body)
    }
}

/// Accept either a flat numeric vector or a single-nested one; anything else
/// is a malformed response.
fn parse_embedding(value: &serde_json::Value) -> Result<Vec<f64>> {
    let array = match value {
        serde_json::Value::Array(outer) => match outer.first() {
            Some(serde_json::Value::Array(inner)) => inner,
            Some(serde_json::Value::Number(_)) => outer,
            _ => {
                return Err(ScreenerError::Embedding(
                    "Unexpected embedding response shape".to_string(),
                ))
            }
        },
        _ => {
            return Err(ScreenerError::Embedding(
                "Embedding response is not an array".to_string(),
            ))
        }
    };

    let vector: Option<Vec<f64>> = array.iter().map(|v| v.as_f64()).collect();
    vector
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ScreenerError::Embedding("Embedding vector contains non-numbers".to_string()))
}

fn prepare_input(text: &str, max_chars: usize) -> String {
    let cleaned = text.trim().replace('\n', " ");
    cleaned.chars().take(max_chars).collect()
}

/// Cosine similarity of two equal-purpose vectors; 0.0 when either norm is 0.
pub(crate) fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0).max(0.0)
}

/// Local lexical similarity in [0, 1]: cosine over term-frequency vectors of
/// lowercased alphanumeric tokens. Never fails; 0.0 for empty input.
pub(crate) fn lexical_similarity(text_a: &str, text_b: &str) -> f64 {
    let freq_a = term_frequencies(text_a);
    let freq_b = term_frequencies(text_b);
    if freq_a.is_empty() || freq_b.is_empty() {
        return 0.0;
    }

    let dot: f64 = freq_a
        .iter()
        .filter_map(|(term, &count)| freq_b.get(term).map(|&other| count as f64 * other as f64))
        .sum();
    let norm_a: f64 = freq_a.values().map(|&c| (c as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = freq_b.values().map(|&c| (c as f64).powi(2)).sum::<f64>().sqrt();

    dot / (norm_a * norm_b)
}

fn term_frequencies(text: &str) -> HashMap<String, usize> {
    let mut freq = HashMap::new();
    for token in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        *freq.entry(token.to_lowercase()).or_insert(0) += 1;
    }
    freq
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
