//! Resume text extraction from an uploaded PDF.
//!
//! Pages are extracted one at a time with lopdf so that a single bad page costs only its
//! own text. If lopdf cannot even load the document, pdf-extract gets a try on the whole
//! buffer before the upload is rejected.

use std::fmt::Display;

use lopdf::Document;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Could not read the uploaded PDF: {0}")]
    Unreadable(String),
}

/// Concatenated text of every page in page order, with no separator between pages.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    match Document::load_mem(bytes) {
        Ok(doc) => {
            let pages = doc.get_pages();
            debug!(pages = pages.len(), "Resume PDF loaded");
            Ok(concat_pages(
                pages.keys().map(|&number| (number, doc.extract_text(&[number]))),
            ))
        }
        Err(load_err) => {
            warn!("lopdf could not load the resume PDF ({load_err}); falling back to pdf-extract");
            pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| ExtractError::Unreadable(format!("{load_err}; {e}")))
        }
    }
}

/// Joins per-page results. A failed page contributes an empty string and a warning.
pub fn concat_pages<I, E>(pages: I) -> String
where
    I: IntoIterator<Item = (u32, Result<String, E>)>,
    E: Display,
{
    pages
        .into_iter()
        .fold(String::new(), |mut text, (number, page)| {
            match page {
                Ok(page_text) => text.push_str(&page_text),
                Err(e) => warn!(page = number, "Page text extraction failed, using empty text: {e}"),
            }
            text
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::HeaderBlock;
    use crate::render::pdf::render_pdf;

    #[test]
    fn test_concat_pages_in_order_without_separator() {
        let pages: Vec<(u32, Result<String, String>)> = vec![
            (1, Ok("first ".to_string())),
            (2, Ok("second".to_string())),
        ];
        assert_eq!(concat_pages(pages), "first second");
    }

    #[test]
    fn test_unparsable_page_degrades_to_empty() {
        let pages: Vec<(u32, Result<String, String>)> = vec![
            (1, Ok("SUMMARY\n".to_string())),
            (2, Err("bad content stream".to_string())),
            (3, Ok("EDUCATION\n".to_string())),
        ];
        assert_eq!(concat_pages(pages), "SUMMARY\nEDUCATION\n");
    }

    #[test]
    fn test_all_pages_failing_gives_empty_text() {
        let pages: Vec<(u32, Result<String, String>)> = vec![(1, Err("boom".to_string()))];
        assert_eq!(concat_pages(pages), "");
    }

    #[test]
    fn test_extracts_text_from_generated_pdf() {
        let header = HeaderBlock::placeholder();
        let pdf = render_pdf("EXPERIENCE\nDid work.", &header).unwrap();
        let text = extract_pdf_text(&pdf.bytes).unwrap();
        assert!(text.contains("EXPERIENCE"), "extracted: {text:?}");
    }

    #[test]
    fn test_garbage_bytes_are_unreadable() {
        let err = extract_pdf_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable(_)));
    }
}
