pub mod ocr;
pub mod pdf;

use ocr::OcrEngine;

/// Below this many characters the text is not worth analysing.
pub const MIN_TEXT_CHARS: usize = 20;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Could not extract enough text from the document to analyze.")]
    EmptyResult,

    #[error("PDF parsing failed: {0}")]
    Pdf(String),

    #[error("OCR failed: {0}")]
    Ocr(String),
}

impl ExtractionError {
    /// Errors caused by the upload itself rather than the extraction engines.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExtractionError::UnsupportedType(_) | ExtractionError::EmptyResult
        )
    }
}

/// Turns an uploaded PDF or image into plain text in one shot.
pub async fn extract(
    ocr: &dyn OcrEngine,
    bytes: &[u8],
    mime_type: &str,
) -> Result<String, ExtractionError> {
    let mime = mime_type.trim().to_lowercase();

    let text = if mime == "application/pdf" {
        let owned = bytes.to_vec();
        tokio::task::spawn_blocking(move || pdf::extract_text(&owned))
            .await
            .map_err(|e| ExtractionError::Pdf(e.to_string()))??
    } else if mime.starts_with("image/") {
        ocr.recognize(bytes).await?
    } else {
        return Err(ExtractionError::UnsupportedType(mime_type.to_string()));
    };

    ensure_meaningful(text)
}

pub fn ensure_meaningful(text: String) -> Result<String, ExtractionError> {
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return Err(ExtractionError::EmptyResult);
    }
    Ok(text)
}
