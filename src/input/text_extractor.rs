//! Text extraction from various file formats

use crate::error::{Result, ScreenerError};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(ScreenerError::Io)?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ScreenerError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(ScreenerError::Io)?;

        let cursor = std::io::Cursor::new(bytes);
        let mut archive = zip::ZipArchive::new(cursor).map_err(|e| {
            ScreenerError::DocxExtraction(format!(
                "'{}' is not a valid DOCX container: {}",
                path.display(),
                e
            ))
        })?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| {
                ScreenerError::DocxExtraction(format!(
                    "'{}' has no document body: {}",
                    path.display(),
                    e
                ))
            })?
            .read_to_string(&mut xml)
            .map_err(ScreenerError::Io)?;

        Ok(Self::xml_to_text(&xml))
    }
}

impl DocxExtractor {
    /// Paragraph and line-break elements become newlines, every other tag is
    /// stripped, basic entities are decoded.
    fn xml_to_text(xml: &str) -> String {
        let text = xml
            .replace("</w:p>", "\n")
            .replace("<w:br/>", "\n")
            .replace("<w:tab/>", " ");

        let clean = tag_regex().replace_all(&text, "");
        let decoded = clean
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'");

        decoded
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(ScreenerError::Io)?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await.map_err(ScreenerError::Io)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(Self::html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    fn html_to_text(html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let clean_text = tag_regex().replace_all(&text, "");

        clean_text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_xml_to_text() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>John Doe</w:t></w:r></w:p><w:p><w:r><w:t>Python &amp; SQL</w:t></w:r></w:p></w:body></w:document>"#;
        let text = DocxExtractor::xml_to_text(xml);
        assert_eq!(text, "John Doe\nPython & SQL");
    }

    #[test]
    fn test_markdown_html_to_text_strips_tags() {
        let html = "<h1>Resume</h1><p>Skills: <strong>python</strong>, sql</p>";
        let text = MarkdownExtractor::html_to_text(html);
        assert!(text.contains("Skills: python, sql"));
        assert!(!text.contains('<'));
    }
}
