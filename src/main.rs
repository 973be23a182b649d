//! Resume screener: resume and job description matching tool

use clap::Parser;
use log::{error, info, warn};
use resume_screener::classifier::TitlePredictor;
use resume_screener::cli::{self, CandidateAction, Cli, Commands, ConfigAction};
use resume_screener::config::Config;
use resume_screener::error::{Result, ScreenerError};
use resume_screener::extraction::fields::{extract_resume_profile, HeuristicNameRecognizer};
use resume_screener::extraction::{SynonymMap, Vocabulary};
use resume_screener::input::InputManager;
use resume_screener::matching::{
    generate_feedback, skill_gap_suggestion, MatchStrategy, ScoringEngine, SimilarityProvider,
};
use resume_screener::output::{render_batch_summary, ScreeningReport};
use resume_screener::store::{CandidateRecord, CandidateStore};
use std::path::Path;
use std::process;

const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match match cli.config.clone() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    } {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

/// Services constructed once at startup and shared read-only by all scoring
/// calls. Classifier load failure aborts startup.
struct Services {
    vocabulary: Vocabulary,
    engine: ScoringEngine,
    predictor: TitlePredictor,
}

impl Services {
    fn new(config: &Config) -> Result<Self> {
        let vocabulary = Vocabulary::standard()?;
        let provider = SimilarityProvider::new(&config.similarity);
        if !provider.has_remote() {
            info!("Remote embedding disabled; semantic scores use the lexical fallback");
        }
        let engine = ScoringEngine::new(provider, SynonymMap::standard())
            .with_term_threshold(config.matching.term_match_threshold);
        let predictor = TitlePredictor::load(&config.classifier.artifact_path)?;

        Ok(Self {
            vocabulary,
            engine,
            predictor,
        })
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            job,
            strategy,
            weight,
            output,
            save,
        } => {
            cli::validate_file_extension(&resume, SUPPORTED_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, SUPPORTED_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format = cli::parse_output_format(&output).map_err(ScreenerError::InvalidInput)?;
            let strategy = resolve_strategy(strategy.as_deref(), weight, &config)?;

            let services = Services::new(&config)?;
            let mut input_manager = InputManager::new();

            info!("Scoring {} against {}", resume.display(), job.display());
            let job_text = input_manager.extract_text(&job).await?;
            let report = screen_resume(&resume, &job, &job_text, &services, &mut input_manager, strategy).await?;

            println!("{}", report.render(&output_format, config.output.color_output)?);

            if save {
                let mut store = CandidateStore::open(&config.storage.results_path)?;
                store.upsert(record_from_report(&report));
                store.save()?;
                info!("Saved result to {}", config.storage.results_path.display());
            }
        }

        Commands::Batch {
            resumes,
            job,
            strategy,
            weight,
        } => {
            if !resumes.is_dir() {
                return Err(ScreenerError::InvalidInput(format!(
                    "Not a directory: {}",
                    resumes.display()
                )));
            }
            let strategy = resolve_strategy(strategy.as_deref(), weight, &config)?;

            let services = Services::new(&config)?;
            let mut input_manager = InputManager::new();
            let mut store = CandidateStore::open(&config.storage.results_path)?;

            let job_text = input_manager.extract_text(&job).await?;

            let mut entries: Vec<_> = std::fs::read_dir(&resumes)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .collect();
            entries.sort();

            // Sequential by design: each resume is scored independently and
            // one bad file must not abort the run.
            let mut reports = Vec::new();
            for path in entries {
                if cli::validate_file_extension(&path, SUPPORTED_EXTENSIONS).is_err() {
                    warn!("Skipping unsupported file: {}", path.display());
                    continue;
                }
                match screen_resume(&path, &job, &job_text, &services, &mut input_manager, strategy).await {
                    Ok(report) => {
                        store.upsert(record_from_report(&report));
                        reports.push(report);
                    }
                    Err(e) => {
                        warn!("Skipping '{}': {}", path.display(), e);
                    }
                }
            }

            store.save()?;
            println!("{}", render_batch_summary(&reports, config.output.color_output));
            info!(
                "Stored {} results in {}",
                reports.len(),
                config.storage.results_path.display()
            );
        }

        Commands::Candidates { action } => {
            let mut store = CandidateStore::open(&config.storage.results_path)?;
            match action {
                CandidateAction::List { starred } => {
                    let records: Vec<_> = store
                        .all()
                        .into_iter()
                        .filter(|r| !starred || r.starred)
                        .collect();
                    if records.is_empty() {
                        println!("No candidate records found.");
                    }
                    for record in records {
                        println!(
                            "{:>6.2}  {}{}  {}  rating {}/5",
                            record.score,
                            record.filename,
                            if record.starred { " *" } else { "" },
                            record.name.as_deref().unwrap_or("None"),
                            record.rating
                        );
                        if !record.notes.is_empty() {
                            println!("        notes: {}", record.notes);
                        }
                    }
                }
                CandidateAction::Annotate {
                    filename,
                    notes,
                    rating,
                } => {
                    store.update_notes_and_rating(&filename, &notes, rating)?;
                    store.save()?;
                    println!("Updated notes and rating for {}", filename);
                }
                CandidateAction::Star { filename } => {
                    let starred = store.toggle_star(&filename)?;
                    store.save()?;
                    println!(
                        "{} is now {}",
                        filename,
                        if starred { "starred" } else { "unstarred" }
                    );
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Similarity endpoint: {}", config.similarity.endpoint_url);
                println!("Request timeout:     {}s", config.similarity.request_timeout_secs);
                println!("Default strategy:    {}", config.matching.default_strategy);
                println!("Skill weight:        {}", config.matching.skill_weight);
                println!("Term threshold:      {}", config.matching.term_match_threshold);
                println!("Classifier artifact: {}", config.classifier.artifact_path.display());
                println!("Candidate store:     {}", config.storage.results_path.display());
            }
            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("Configuration reset to defaults.");
            }
        },
    }

    Ok(())
}

fn resolve_strategy(
    name: Option<&str>,
    weight: Option<f64>,
    config: &Config,
) -> Result<MatchStrategy> {
    let name = name.unwrap_or(&config.matching.default_strategy);
    cli::parse_strategy(name, weight.or(Some(config.matching.skill_weight)))
        .map_err(ScreenerError::InvalidInput)
}

/// Extract, score, and explain one resume against the already-extracted job
/// description text.
async fn screen_resume(
    resume_path: &Path,
    job_path: &Path,
    job_text: &str,
    services: &Services,
    input_manager: &mut InputManager,
    strategy: MatchStrategy,
) -> Result<ScreeningReport> {
    let resume_text = input_manager.extract_text(resume_path).await?;

    let profile = extract_resume_profile(&resume_text, &services.vocabulary, &HeuristicNameRecognizer);
    let jd_skills = services.vocabulary.extract(job_text);

    let result = services.engine.score(&profile.skills, &jd_skills, strategy).await;
    let feedback = generate_feedback(result.score, &result.matched_skills, &jd_skills);
    let gap_suggestion = skill_gap_suggestion(&profile.skills, &jd_skills);
    let title_predictions = services.predictor.predict(&resume_text);

    Ok(ScreeningReport {
        resume_file: resume_path.to_string_lossy().to_string(),
        job_file: job_path.to_string_lossy().to_string(),
        profile,
        jd_skills,
        result,
        feedback,
        gap_suggestion,
        title_predictions,
    })
}

fn record_from_report(report: &ScreeningReport) -> CandidateRecord {
    CandidateRecord {
        filename: Path::new(&report.resume_file)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| report.resume_file.clone()),
        name: report.profile.contact.name.clone(),
        email: report.profile.contact.email.clone(),
        score: report.result.score,
        matched_skills: report.result.matched_skills.to_vec(),
        feedback: report.feedback.message.clone(),
        predicted_title: report.title_predictions.first().map(|p| p.label.clone()),
        notes: String::new(),
        rating: 0,
        starred: false,
        updated_at: chrono::Utc::now(),
    }
}
