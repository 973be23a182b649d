//! Input manager for handling different file types

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

/// Routes files to the right extractor and caches results by path.
///
/// Unreadable content and unsupported formats degrade to empty text with a
/// warning instead of failing the caller: one bad file must not abort a
/// batch. A missing file is still an error since that points at a bad path
/// rather than a bad document.
pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = Self::detect_file_type(path);

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                Self::degrade_on_failure(path, PdfExtractor.extract(path).await)
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                Self::degrade_on_failure(path, DocxExtractor.extract(path).await)
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                Self::degrade_on_failure(path, PlainTextExtractor.extract(path).await)
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                Self::degrade_on_failure(path, MarkdownExtractor.extract(path).await)
            }
            FileType::Unknown => {
                warn!(
                    "Unsupported file type for '{}'; treating as empty",
                    path.display()
                );
                String::new()
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn degrade_on_failure(path: &Path, result: Result<String>) -> String {
        match result {
            Ok(text) => text,
            Err(e) => {
                warn!("Extraction failed for '{}': {}; treating as empty", path.display(), e);
                String::new()
            }
        }
    }

    fn detect_file_type(path: &Path) -> FileType {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
