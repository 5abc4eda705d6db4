//! PDF Text Extractor: turns an uploaded file into the plain text sent to the parser endpoint.

use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::media_type;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid file type '{declared}': please upload a PDF file")]
    InvalidFileType { declared: String },

    #[error("Could not read text from this file")]
    EmptyExtraction,

    #[error("Failed to read PDF: {0}")]
    Parse(String),
}

impl ExtractionError {
    /// Message shown to the person who uploaded the file.
    pub fn user_message(&self) -> String {
        match self {
            ExtractionError::InvalidFileType { .. } => "Please upload a PDF file".to_string(),
            ExtractionError::EmptyExtraction => {
                "Could not read text from this file. Scanned or image-only PDFs are not supported."
                    .to_string()
            }
            ExtractionError::Parse(_) => "This file could not be opened as a PDF".to_string(),
        }
    }
}

/// Text pulled out of a PDF, pages in document order separated by blank lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

/// Extracts text from `bytes`, which the uploader declared as `declared_media_type`.
///
/// The media type is checked before the bytes are touched. Within a page, text
/// fragments are joined with a single space; every page is followed by `"\n\n"`.
pub fn extract_resume_text(
    bytes: &[u8],
    declared_media_type: &str,
) -> Result<ExtractedText, ExtractionError> {
    ensure_pdf(declared_media_type)?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;

    let text = join_pages(&pages);
    if text.trim().is_empty() {
        warn!(pages = pages.len(), "PDF contains no extractable text");
        return Err(ExtractionError::EmptyExtraction);
    }

    debug!(pages = pages.len(), chars = text.len(), "Extracted PDF text");
    Ok(ExtractedText {
        text,
        page_count: pages.len(),
    })
}

/// Runs [`extract_resume_text`] on the blocking pool. A panic inside the PDF
/// parser surfaces as `ExtractionError::Parse` instead of tearing down the caller.
pub async fn spawn_extract(
    bytes: Vec<u8>,
    declared_media_type: String,
) -> Result<ExtractedText, ExtractionError> {
    ensure_pdf(&declared_media_type)?;

    tokio::task::spawn_blocking(move || extract_resume_text(&bytes, &declared_media_type))
        .await
        .map_err(|e| ExtractionError::Parse(format!("extraction task failed: {e}")))?
}

fn ensure_pdf(declared_media_type: &str) -> Result<(), ExtractionError> {
    if media_type::is_pdf(declared_media_type) {
        Ok(())
    } else {
        Err(ExtractionError::InvalidFileType {
            declared: declared_media_type.to_string(),
        })
    }
}

fn join_pages(pages: &[String]) -> String {
    let mut full = String::new();
    for page in pages {
        let fragments: Vec<&str> = page.split_whitespace().collect();
        full.push_str(&fragments.join(" "));
        full.push_str("\n\n");
    }
    full
}
