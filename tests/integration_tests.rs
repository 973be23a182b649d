//! End-to-end tests over the fixture resumes and job description.

use resume_screener::classifier::TitlePredictor;
use resume_screener::extraction::fields::{extract_resume_profile, ExperienceTier, HeuristicNameRecognizer};
use resume_screener::extraction::{SynonymMap, Vocabulary};
use resume_screener::input::InputManager;
use resume_screener::matching::{
    generate_feedback, skill_gap_suggestion, MatchStrategy, ScoringEngine, SimilarityProvider,
};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn engine() -> ScoringEngine {
    ScoringEngine::new(SimilarityProvider::lexical_only(), SynonymMap::standard())
}

#[tokio::test]
async fn test_end_to_end_exact_match() {
    let mut input = InputManager::new();
    let resume_text = input.extract_text(&fixture("sample_resume.txt")).await.unwrap();
    let job_text = input.extract_text(&fixture("sample_job.txt")).await.unwrap();

    let vocab = Vocabulary::standard().unwrap();
    let profile = extract_resume_profile(&resume_text, &vocab, &HeuristicNameRecognizer);
    let jd_skills = vocab.extract(&job_text);

    assert!(jd_skills.contains("python"));
    assert!(jd_skills.contains("sql"));
    assert!(jd_skills.contains("machine learning"));
    assert!(jd_skills.contains("excel"));

    let result = engine().score(&profile.skills, &jd_skills, MatchStrategy::Exact).await;

    // Resume covers python, sql, machine learning out of 4 required skills.
    assert_eq!(result.score, 75.0);
    assert!(result.matched_skills.contains("python"));
    assert!(!result.matched_skills.contains("excel"));
    assert!(result.matched_skills.is_subset(&jd_skills));

    let feedback = generate_feedback(result.score, &result.matched_skills, &jd_skills);
    assert!(feedback.message.contains("Moderate"));
    assert!(feedback.message.contains("excel"));

    let gap = skill_gap_suggestion(&profile.skills, &jd_skills);
    assert_eq!(gap, "Consider learning: excel");
}

#[tokio::test]
async fn test_profile_extraction_from_fixture() {
    let mut input = InputManager::new();
    let text = input.extract_text(&fixture("sample_resume.txt")).await.unwrap();

    let vocab = Vocabulary::standard().unwrap();
    let profile = extract_resume_profile(&text, &vocab, &HeuristicNameRecognizer);

    assert_eq!(profile.contact.name.as_deref(), Some("John Doe"));
    assert_eq!(profile.contact.email.as_deref(), Some("john.doe@example.com"));
    assert!(profile.contact.phone.is_some());
    assert_eq!(profile.experience, ExperienceTier::Senior);
    assert!(profile.skills.contains("pandas"));
    assert!(profile.skills.contains("communication"));
}

#[tokio::test]
async fn test_markdown_resume_pipeline() {
    let mut input = InputManager::new();
    let text = input.extract_text(&fixture("sample_resume.md")).await.unwrap();

    let vocab = Vocabulary::standard().unwrap();
    let profile = extract_resume_profile(&text, &vocab, &HeuristicNameRecognizer);

    assert_eq!(profile.contact.name.as_deref(), Some("Jane Smith"));
    assert!(profile.skills.contains("python"));
    assert!(profile.skills.contains("flask"));
    assert_eq!(profile.experience, ExperienceTier::MidLevel);
}

#[tokio::test]
async fn test_synonym_strategy_end_to_end() {
    let mut input = InputManager::new();
    let resume_text = input.extract_text(&fixture("sample_resume.txt")).await.unwrap();
    let job_text = input.extract_text(&fixture("sample_job.txt")).await.unwrap();

    let vocab = Vocabulary::standard().unwrap();
    let resume_skills = vocab.extract(&resume_text);
    let jd_skills = vocab.extract(&job_text);

    let engine = engine();
    let exact = engine.score(&resume_skills, &jd_skills, MatchStrategy::Exact).await;
    let synonym = engine.score(&resume_skills, &jd_skills, MatchStrategy::Synonym).await;

    // Synonym expansion never loses matches the exact strategy found.
    assert!(synonym.matched_skills.len() >= exact.matched_skills.len());
    assert!(synonym.matched_skills.is_subset(&jd_skills));
}

#[tokio::test]
async fn test_semantic_strategy_offline() {
    let mut input = InputManager::new();
    let resume_text = input.extract_text(&fixture("sample_resume.txt")).await.unwrap();
    let job_text = input.extract_text(&fixture("sample_job.txt")).await.unwrap();

    let vocab = Vocabulary::standard().unwrap();
    let resume_skills = vocab.extract(&resume_text);
    let jd_skills = vocab.extract(&job_text);

    let result = engine()
        .score(&resume_skills, &jd_skills, MatchStrategy::Semantic { skill_weight: 0.5 })
        .await;

    assert!(result.score >= 0.0 && result.score <= 100.0);
    assert_eq!(
        result.similarity_source,
        Some(resume_screener::matching::SimilaritySource::LexicalFallback)
    );
}

#[test]
fn test_classifier_artifact_loads_and_predicts() {
    let artifact = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/title_model.json");
    let predictor = TitlePredictor::load(&artifact).unwrap();

    let text = std::fs::read_to_string(fixture("sample_resume.txt")).unwrap();
    let predictions = predictor.predict(&text);

    assert!(!predictions.is_empty());
    assert!(predictions.len() <= 3);
    for pair in predictions.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
    for p in &predictions {
        assert!(p.confidence >= 0.0 && p.confidence <= 100.0);
    }
}

#[test]
fn test_classifier_missing_artifact_is_fatal() {
    let missing = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/does_not_exist.json");
    assert!(TitlePredictor::load(&missing).is_err());
}

#[tokio::test]
async fn test_unreadable_document_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let bad_pdf = dir.path().join("broken.pdf");
    std::fs::write(&bad_pdf, b"not a real pdf").unwrap();

    let mut input = InputManager::new();
    let text = input.extract_text(&bad_pdf).await.unwrap();
    assert!(text.is_empty());
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let mut input = InputManager::new();
    assert!(input.extract_text(Path::new("/nonexistent/resume.txt")).await.is_err());
}
