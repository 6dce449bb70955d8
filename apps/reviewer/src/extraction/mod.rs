// Upload → plain text.
// Both formats converge on the same ResumeDocument once text is extracted.

pub mod pdf;
pub mod text;

use std::path::Path;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

pub use pdf::{PdfExtractBackend, PdfTextExtractor};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type '{0}'. Upload a .pdf or .txt file")]
    UnsupportedFormat(String),

    #[error("The uploaded file is empty")]
    Empty,

    #[error("The uploaded file is too large ({size} bytes, limit {limit} bytes)")]
    TooLarge { size: usize, limit: usize },

    #[error("Could not read the PDF: {0}")]
    Pdf(String),
}

/// Declared format of an upload, chosen from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeFormat {
    Pdf,
    Text,
}

impl ResumeFormat {
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractionError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();
        match extension.as_str() {
            "pdf" => Ok(ResumeFormat::Pdf),
            "txt" => Ok(ResumeFormat::Text),
            _ => Err(ExtractionError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

/// An uploaded resume together with its extracted text.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub file_name: String,
    /// Size of the upload in bytes.
    pub byte_len: usize,
    pub format: ResumeFormat,
    pub text: String,
}

/// Validates the upload and extracts its text layer.
///
/// PDF pages are joined with `\n` in page order. Text files are decoded as
/// UTF-8 with invalid sequences dropped.
pub fn extract_document(
    file_name: &str,
    raw: Bytes,
    max_bytes: usize,
    pdf: &dyn PdfTextExtractor,
) -> Result<ResumeDocument, ExtractionError> {
    let format = ResumeFormat::from_file_name(file_name)?;

    if raw.is_empty() {
        return Err(ExtractionError::Empty);
    }
    if raw.len() > max_bytes {
        return Err(ExtractionError::TooLarge {
            size: raw.len(),
            limit: max_bytes,
        });
    }

    let text = match format {
        ResumeFormat::Pdf => pdf.extract_pages(&raw)?.join("\n"),
        ResumeFormat::Text => text::decode_lossy(&raw),
    };

    Ok(ResumeDocument {
        file_name: file_name.to_string(),
        byte_len: raw.len(),
        format,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPages(Vec<&'static str>);

    impl PdfTextExtractor for FixedPages {
        fn extract_pages(&self, _bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ResumeFormat::from_file_name("cv.pdf").unwrap(),
            ResumeFormat::Pdf
        );
        assert_eq!(
            ResumeFormat::from_file_name("CV.PDF").unwrap(),
            ResumeFormat::Pdf
        );
        assert_eq!(
            ResumeFormat::from_file_name("notes.txt").unwrap(),
            ResumeFormat::Text
        );
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = ResumeFormat::from_file_name("resume.docx").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
        assert!(ResumeFormat::from_file_name("resume").is_err());
    }

    #[test]
    fn test_pdf_pages_joined_with_newline() {
        let pdf = FixedPages(vec!["page one", "page two", "page three"]);
        let doc = extract_document("cv.pdf", Bytes::from_static(b"%PDF"), 1024, &pdf).unwrap();
        assert_eq!(doc.text, "page one\npage two\npage three");
        assert_eq!(doc.format, ResumeFormat::Pdf);
    }

    #[test]
    fn test_text_upload_decoded() {
        let pdf = FixedPages(vec![]);
        let raw = Bytes::from_static(b"Python developer\xff with SQL");
        let doc = extract_document("cv.txt", raw, 1024, &pdf).unwrap();
        assert_eq!(doc.text, "Python developer with SQL");
        assert_eq!(doc.file_name, "cv.txt");
    }

    #[test]
    fn test_empty_upload_rejected() {
        let pdf = FixedPages(vec![]);
        let err = extract_document("cv.txt", Bytes::new(), 1024, &pdf).unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[test]
    fn test_oversized_upload_rejected() {
        let pdf = FixedPages(vec![]);
        let raw = Bytes::from(vec![b'a'; 32]);
        let err = extract_document("cv.txt", raw, 16, &pdf).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::TooLarge {
                size: 32,
                limit: 16
            }
        ));
    }
}
