use anyhow::{Context, Result};

/// Extract the text of every page, concatenated in page order.
///
/// Pages without a text layer (scanned images) contribute nothing; only a
/// stream that cannot be parsed at all is an error.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .context("Failed to extract text from PDF")?;

    tracing::debug!("PDF parsed into {} page(s)", pages.len());

    Ok(pages.concat())
}

/// Run [`extract_text`] on the blocking pool so a large PDF does not stall
/// the async runtime. A panic inside the PDF parser surfaces as an error.
pub async fn extract_text_blocking(pdf_bytes: Vec<u8>, filename: &str) -> Result<String> {
    let fname = filename.to_string();

    tracing::info!(
        "extract_text: starting blocking extraction for '{fname}' ({} bytes)",
        pdf_bytes.len()
    );

    let handle = tokio::task::spawn_blocking(move || {
        let result = extract_text(&pdf_bytes);
        match &result {
            Ok(text) => tracing::info!("extract_text: '{fname}' extraction succeeded, {} chars", text.len()),
            Err(e) => tracing::warn!("extract_text: '{fname}' extraction failed: {e:#}"),
        }
        result
    });

    handle.await.context("Text extraction task panicked")?
}
