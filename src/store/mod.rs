//! Candidate record store
//!
//! A JSON-file table keyed by resume filename. The matching core never
//! touches this; the CLI layer persists scoring output and reviewer
//! annotations here after each run.

use crate::error::{Result, ScreenerError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Persisted screening row. The filename is the upsert key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub filename: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub feedback: String,
    pub predicted_title: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub starred: bool,
    pub updated_at: DateTime<Utc>,
}

pub struct CandidateStore {
    path: PathBuf,
    records: BTreeMap<String, CandidateRecord>,
}

impl CandidateStore {
    /// Open the store, creating an empty one if the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        let records = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)
                .map_err(|e| ScreenerError::Store(format!("Failed to parse candidate store: {}", e)))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Insert or replace the record for its filename, preserving existing
    /// reviewer annotations on replace.
    pub fn upsert(&mut self, mut record: CandidateRecord) {
        if let Some(existing) = self.records.get(&record.filename) {
            record.notes = existing.notes.clone();
            record.rating = existing.rating;
            record.starred = existing.starred;
        }
        self.records.insert(record.filename.clone(), record);
    }

    pub fn get(&self, filename: &str) -> Option<&CandidateRecord> {
        self.records.get(filename)
    }

    /// All records in filename order.
    pub fn all(&self) -> Vec<&CandidateRecord> {
        self.records.values().collect()
    }

    pub fn update_notes_and_rating(&mut self, filename: &str, notes: &str, rating: u8) -> Result<()> {
        let record = self.records.get_mut(filename).ok_or_else(|| {
            ScreenerError::Store(format!("No candidate record for '{}'", filename))
        })?;
        record.notes = notes.to_string();
        record.rating = rating.min(5);
        record.updated_at = Utc::now();
        Ok(())
    }

    pub fn toggle_star(&mut self, filename: &str) -> Result<bool> {
        let record = self.records.get_mut(filename).ok_or_else(|| {
            ScreenerError::Store(format!("No candidate record for '{}'", filename))
        })?;
        record.starred = !record.starred;
        record.updated_at = Utc::now();
        Ok(record.starred)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(filename: &str, score: f64) -> CandidateRecord {
        CandidateRecord {
            filename: filename.to_string(),
            name: Some("Alice Johnson".to_string()),
            email: Some("alice@example.com".to_string()),
            score,
            matched_skills: vec!["python".to_string(), "sql".to_string()],
            feedback: "Strong match. Candidate is well-aligned.".to_string(),
            predicted_title: Some("Data Analyst".to_string()),
            notes: String::new(),
            rating: 0,
            starred: false,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_upsert_and_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("candidates.json");

        let mut store = CandidateStore::open(&path).unwrap();
        store.upsert(record("alice_resume.pdf", 88.5));
        store.save().unwrap();

        let reopened = CandidateStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get("alice_resume.pdf").unwrap().score, 88.5);
    }

    #[test]
    fn test_upsert_keyed_by_filename() {
        let dir = tempdir().unwrap();
        let mut store = CandidateStore::open(&dir.path().join("c.json")).unwrap();

        store.upsert(record("resume.pdf", 50.0));
        store.upsert(record("resume.pdf", 75.0));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("resume.pdf").unwrap().score, 75.0);
    }

    #[test]
    fn test_upsert_preserves_annotations() {
        let dir = tempdir().unwrap();
        let mut store = CandidateStore::open(&dir.path().join("c.json")).unwrap();

        store.upsert(record("resume.pdf", 50.0));
        store.update_notes_and_rating("resume.pdf", "promising", 4).unwrap();
        store.toggle_star("resume.pdf").unwrap();

        // Re-scoring the same file keeps the reviewer's annotations.
        store.upsert(record("resume.pdf", 80.0));
        let rec = store.get("resume.pdf").unwrap();
        assert_eq!(rec.score, 80.0);
        assert_eq!(rec.notes, "promising");
        assert_eq!(rec.rating, 4);
        assert!(rec.starred);
    }

    #[test]
    fn test_toggle_star_flips() {
        let dir = tempdir().unwrap();
        let mut store = CandidateStore::open(&dir.path().join("c.json")).unwrap();
        store.upsert(record("resume.pdf", 50.0));

        assert!(store.toggle_star("resume.pdf").unwrap());
        assert!(!store.toggle_star("resume.pdf").unwrap());
    }

    #[test]
    fn test_missing_record_errors() {
        let dir = tempdir().unwrap();
        let mut store = CandidateStore::open(&dir.path().join("c.json")).unwrap();
        assert!(store.update_notes_and_rating("nope.pdf", "", 1).is_err());
        assert!(store.toggle_star("nope.pdf").is_err());
    }

    #[test]
    fn test_rating_clamped() {
        let dir = tempdir().unwrap();
        let mut store = CandidateStore::open(&dir.path().join("c.json")).unwrap();
        store.upsert(record("resume.pdf", 50.0));
        store.update_notes_and_rating("resume.pdf", "", 9).unwrap();
        assert_eq!(store.get("resume.pdf").unwrap().rating, 5);
    }
}
