use lopdf::Document;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{SourceDocument, SourceFormat},
};

const PAGE_SEPARATOR: &str = "\n";

pub fn extract_text(document: &SourceDocument) -> AppResult<String> {
    let text = match document.format {
        SourceFormat::Text => decode_text(&document.bytes)?,
        SourceFormat::Pdf => extract_pdf_text(&document.bytes)?,
    };

    log::info!(
        "Extracted {} characters from '{}'",
        text.chars().count(),
        document.file_name
    );
    Ok(text)
}

fn decode_text(bytes: &[u8]) -> AppResult<String> {
    Ok(std::str::from_utf8(bytes)?.to_string())
}

fn extract_pdf_text(bytes: &[u8]) -> AppResult<String> {
    let doc = Document::load_mem(bytes)?;

    if doc.is_encrypted() {
        return Err(AppError::ExtractionError(
            "PDF is encrypted; upload an unprotected copy".to_string(),
        ));
    }

    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(AppError::ExtractionError("PDF has no pages".to_string()));
    }

    let mut page_texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        let text = doc.extract_text(&[*page_number]).map_err(|e| {
            AppError::ExtractionError(format!(
                "failed to extract text from page {}: {}",
                page_number, e
            ))
        })?;
        page_texts.push(text);
    }

    let text = page_texts.join(PAGE_SEPARATOR);
    if text.trim().is_empty() {
        return Err(AppError::ExtractionError(
            "PDF has no extractable text layer; scanned documents are not supported".to_string(),
        ));
    }

    log::debug!("Read {} PDF pages", page_texts.len());
    Ok(text)
}
