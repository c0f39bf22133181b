//! Text extraction for uploaded documents.
//!
//! Produces the plain text handed to the model: body text first, then every
//! hyperlink target found in the file, one per line. Parsing is CPU-bound and
//! some parsers panic on malformed input, so async callers go through
//! [`extract_uploaded`], which runs the work on the blocking pool.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

pub mod docx;
pub mod pdf;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported file type for '{0}' (expected .pdf, .docx, .txt or .md)")]
    UnsupportedFormat(String),

    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("could not read DOCX: {0}")]
    Docx(String),

    #[error("no text could be extracted from '{0}'")]
    Empty(String),

    #[error("text extraction aborted: {0}")]
    Worker(String),
}

/// A file received over HTTP, held in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Pdf,
    Docx,
    Text,
}

impl Format {
    fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Format::Pdf),
            "docx" => Some(Format::Docx),
            "txt" | "md" => Some(Format::Text),
            _ => None,
        }
    }
}

/// Text and link targets read from a document, before they are joined.
#[derive(Debug, Default)]
pub(crate) struct Extracted {
    pub text: String,
    pub links: Vec<String>,
}

impl Extracted {
    fn push_link(&mut self, link: &str) {
        let link = link.trim();
        if !link.is_empty() && !self.links.iter().any(|l| l == link) {
            self.links.push(link.to_string());
        }
    }

    fn into_text(self) -> String {
        let mut out = self.text.trim().to_string();
        if !self.links.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.links.join("\n"));
        }
        out
    }
}

/// Extracts text from `bytes`, choosing the parser by the file extension.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, DocumentError> {
    let format = Format::from_filename(filename)
        .ok_or_else(|| DocumentError::UnsupportedFormat(filename.to_string()))?;

    let extracted = match format {
        Format::Pdf => pdf::extract(bytes)?,
        Format::Docx => docx::extract(bytes)?,
        Format::Text => Extracted {
            text: String::from_utf8_lossy(bytes).into_owned(),
            links: Vec::new(),
        },
    };
    debug!(
        "Extracted {} chars and {} links from {filename}",
        extracted.text.len(),
        extracted.links.len()
    );

    let text = extracted.into_text();
    if text.trim().is_empty() {
        return Err(DocumentError::Empty(filename.to_string()));
    }
    Ok(text)
}

/// Async wrapper over [`extract_text`] that keeps parsing off the runtime threads.
pub async fn extract_uploaded(file: &UploadedFile) -> Result<String, DocumentError> {
    let data = file.data.clone();
    let filename = file.filename.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(&data, &filename))
        .await
        .map_err(|e| DocumentError::Worker(e.to_string()))??;
    info!("Read {} ({} chars)", file.filename, text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_chosen_by_extension_case_insensitively() {
        assert_eq!(Format::from_filename("cv.PDF"), Some(Format::Pdf));
        assert_eq!(Format::from_filename("cv.final.docx"), Some(Format::Docx));
        assert_eq!(Format::from_filename("notes.md"), Some(Format::Text));
        assert_eq!(Format::from_filename("resume"), None);
        assert_eq!(Format::from_filename("photo.png"), None);
    }

    #[test]
    fn test_plain_text_passes_through() {
        let text = extract_text(b"Jane Doe\nRust engineer\n", "cv.txt").unwrap();
        assert_eq!(text, "Jane Doe\nRust engineer");
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = extract_text(b"GIF89a", "avatar.gif").unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFormat(name) if name == "avatar.gif"));
    }

    #[test]
    fn test_blank_document_is_empty_error() {
        let err = extract_text(b"  \n\t ", "blank.txt").unwrap_err();
        assert!(matches!(err, DocumentError::Empty(_)));
    }

    #[test]
    fn test_links_follow_text_without_duplicates() {
        let mut extracted = Extracted {
            text: "Jane Doe\n".to_string(),
            links: Vec::new(),
        };
        extracted.push_link("https://github.com/jane");
        extracted.push_link(" https://github.com/jane ");
        extracted.push_link("https://linkedin.com/in/jane");
        assert_eq!(
            extracted.into_text(),
            "Jane Doe\n\nhttps://github.com/jane\nhttps://linkedin.com/in/jane"
        );
    }

    #[test]
    fn test_corrupt_pdf_is_a_document_error() {
        let err = extract_text(b"not really a pdf", "cv.pdf").unwrap_err();
        assert!(matches!(err, DocumentError::Pdf(_)));
    }

    #[tokio::test]
    async fn test_extract_uploaded_runs_off_thread() {
        let file = UploadedFile {
            filename: "cv.txt".to_string(),
            data: Bytes::from_static(b"Jane Doe"),
        };
        assert_eq!(extract_uploaded(&file).await.unwrap(), "Jane Doe");
    }
}
