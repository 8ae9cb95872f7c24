use lopdf::Document;
use std::path::Path;

use super::PageText;
use crate::utils::{check_file_accessible, format_file_size};
use crate::{NotesError, Result};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Parser turning a document into per-page text
#[cfg_attr(test, mockall::automock)]
pub trait DocumentParser: Send + Sync {
    /// Parse the document and return the text of every page, in document order
    fn parse(&self, bytes: &[u8]) -> Result<Vec<PageText>>;

    /// Name of the parser for logging
    fn parser_name(&self) -> &'static str;
}

/// Pure Rust PDF parser backed by lopdf
pub struct LopdfParser;

impl LopdfParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LopdfParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for LopdfParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<PageText>> {
        let document = Document::load_mem(bytes)
            .map_err(|e| NotesError::ExtractionFailed(format!("Failed to parse PDF: {}", e)))?;

        let pages = document.get_pages();
        tracing::debug!("PDF has {} pages", pages.len());

        // get_pages is keyed by page number, so iteration follows document order
        pages
            .keys()
            .map(|&number| -> Result<PageText> {
                let text = document.extract_text(&[number]).map_err(|e| {
                    NotesError::ExtractionFailed(format!(
                        "Failed to extract text from page {}: {}",
                        number, e
                    ))
                })?;
                // lopdf ends each text object with a newline; join_pages adds the page terminator
                let text = text.strip_suffix('\n').unwrap_or(&text);
                Ok(PageText::new(number, text))
            })
            .collect()
    }

    fn parser_name(&self) -> &'static str {
        "lopdf"
    }
}

/// Whether the bytes start with the PDF file signature
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Concatenate page texts, appending a newline after every page including the last
pub fn join_pages(pages: &[PageText]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&page.text);
        text.push('\n');
    }
    text
}

/// Read an uploaded document from disk
pub fn read_document(path: &Path) -> Result<Vec<u8>> {
    check_file_accessible(path).map_err(|e| NotesError::InvalidInput(e.to_string()))?;

    let bytes = fs_err::read(path)
        .map_err(|e| NotesError::InvalidInput(format!("Cannot read document: {}", e)))?;

    tracing::info!(
        "Read document {} ({})",
        path.display(),
        format_file_size(bytes.len() as u64)
    );

    Ok(bytes)
}
