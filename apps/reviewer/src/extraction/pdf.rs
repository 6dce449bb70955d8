use super::ExtractionError;

/// Bytes → per-page text, in page order.
///
/// Carried in `AppState` as `Arc<dyn PdfTextExtractor>` so the backend can be
/// swapped without touching handlers.
pub trait PdfTextExtractor: Send + Sync {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// Text-layer extraction through the `pdf-extract` crate.
pub struct PdfExtractBackend;

impl PdfTextExtractor for PdfExtractBackend {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string()))
    }
}
