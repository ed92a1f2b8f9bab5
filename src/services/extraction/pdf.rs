use super::ExtractionError;

/// Page text of a digital PDF, concatenated in page order.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    tracing::info!(pages = pages.len(), "extracted PDF text");

    Ok(pages
        .iter()
        .map(|page| page.trim_end())
        .collect::<Vec<_>>()
        .join("\n"))
}
