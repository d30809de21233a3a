//! Text Extraction — flattens an uploaded PDF, DOCX or plain-text document into a string.
//!
//! Extraction is local, deterministic and CPU-bound. Handlers call
//! [`extract_in_background`] so parsing never blocks the async runtime.

pub mod docx;
pub mod pdf;

use bytes::Bytes;
use thiserror::Error;

use crate::errors::AppError;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_MIME: &str = "text/plain";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Unreadable PDF: {0}")]
    Pdf(String),

    #[error("Unreadable DOCX: {0}")]
    Docx(String),

    #[error("Document is not valid UTF-8 text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// The format tag carried by an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Maps a MIME type (parameters such as `; charset=utf-8` are ignored).
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            PDF_MIME => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            TEXT_MIME => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Maps a file name by its extension.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Content type wins; the file extension is the fallback for generic
    /// types like `application/octet-stream`.
    pub fn detect(
        content_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<Self, ExtractError> {
        content_type
            .and_then(Self::from_content_type)
            .or_else(|| file_name.and_then(Self::from_file_name))
            .ok_or_else(|| {
                ExtractError::UnsupportedFormat(format!(
                    "content type {:?}, file name {:?}",
                    content_type.unwrap_or("none"),
                    file_name.unwrap_or("none")
                ))
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::PlainText => "TXT",
        }
    }
}

/// Raw uploaded content plus its format tag. Dropped once text is extracted.
#[derive(Debug, Clone)]
pub struct Document {
    pub format: DocumentFormat,
    pub content: Bytes,
}

impl Document {
    pub fn new(format: DocumentFormat, content: impl Into<Bytes>) -> Self {
        Self {
            format,
            content: content.into(),
        }
    }
}

/// Returns the flat text of a document. The result may be empty.
pub fn extract_text(document: &Document) -> Result<String, ExtractError> {
    match document.format {
        DocumentFormat::Pdf => pdf::extract_pdf_text(&document.content),
        DocumentFormat::Docx => docx::extract_docx_text(&document.content),
        DocumentFormat::PlainText => Ok(String::from_utf8(document.content.to_vec())?),
    }
}

/// Runs [`extract_text`] on the blocking thread pool.
pub async fn extract_in_background(document: Document) -> Result<String, AppError> {
    let format = document.format;
    let text = tokio::task::spawn_blocking(move || extract_text(&document))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;
    tracing::debug!("Extracted {} chars from {} document", text.len(), format.label());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_detection() {
        assert_eq!(
            DocumentFormat::from_content_type("application/pdf"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_content_type(DOCX_MIME),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(
            DocumentFormat::from_content_type("text/plain; charset=utf-8"),
            Some(DocumentFormat::PlainText)
        );
        assert_eq!(DocumentFormat::from_content_type("image/png"), None);
    }

    #[test]
    fn test_file_name_detection_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_file_name("Resume.PDF"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_file_name("cv.final.docx"),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(
            DocumentFormat::from_file_name("jd.txt"),
            Some(DocumentFormat::PlainText)
        );
        assert_eq!(DocumentFormat::from_file_name("README"), None);
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        let format =
            DocumentFormat::detect(Some("application/octet-stream"), Some("resume.docx")).unwrap();
        assert_eq!(format, DocumentFormat::Docx);
    }

    #[test]
    fn test_detect_unknown_is_unsupported() {
        let err = DocumentFormat::detect(Some("image/png"), Some("photo.png")).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_plain_text_is_decoded_as_utf8() {
        let doc = Document::new(DocumentFormat::PlainText, "Senior Rust engineer — remote");
        assert_eq!(extract_text(&doc).unwrap(), "Senior Rust engineer — remote");
    }

    #[test]
    fn test_invalid_utf8_is_a_read_error() {
        let doc = Document::new(DocumentFormat::PlainText, vec![0xff, 0xfe, 0x00]);
        assert!(matches!(extract_text(&doc), Err(ExtractError::Utf8(_))));
    }

    #[test]
    fn test_empty_plain_text_is_allowed() {
        let doc = Document::new(DocumentFormat::PlainText, Vec::new());
        assert_eq!(extract_text(&doc).unwrap(), "");
    }

    #[tokio::test]
    async fn test_extract_in_background_propagates_read_errors() {
        let doc = Document::new(DocumentFormat::Pdf, b"definitely not a pdf".to_vec());
        let err = extract_in_background(doc).await.unwrap_err();
        assert!(matches!(err, AppError::DocumentRead(ExtractError::Pdf(_))));
    }
}
