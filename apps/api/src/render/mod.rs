// Output artifacts: the rewritten resume as PDF and Word files, exposed as data-URI links.
// Rendering is CPU-bound; callers run `export_resume` inside tokio::task::spawn_blocking.

pub mod docx;
pub mod download;
pub mod encoding;
pub mod pdf;

use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::layout::HeaderBlock;
use download::{build_download_link, DownloadLink, DOCX_MIME_SUFFIX, PDF_MIME_SUFFIX};

pub const PDF_FILENAME: &str = "updated_resume.pdf";
pub const DOCX_FILENAME: &str = "updated_resume.docx";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("DOCX rendering failed: {0}")]
    Docx(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Both download links plus the PDF encoding loss.
#[derive(Debug, Clone)]
pub struct ExportedResume {
    pub downloads: Vec<DownloadLink>,
    pub dropped_characters: usize,
}

/// Writes `updated_resume.pdf` and `updated_resume.docx` into `dir` and returns links to both.
///
/// `dir` should be private to the caller: file names are fixed.
pub fn export_resume(
    text: &str,
    header: &HeaderBlock,
    dir: &Path,
) -> Result<ExportedResume, RenderError> {
    let pdf = pdf::render_pdf(text, header)?;
    if pdf.dropped_characters > 0 {
        warn!(
            dropped = pdf.dropped_characters,
            "Characters outside Latin-1 were dropped from the PDF output"
        );
    }
    let pdf_path = dir.join(PDF_FILENAME);
    std::fs::write(&pdf_path, &pdf.bytes)?;

    let docx_bytes = docx::render_docx(text, header)?;
    let docx_path = dir.join(DOCX_FILENAME);
    std::fs::write(&docx_path, &docx_bytes)?;

    info!(
        pdf_pages = pdf.page_count,
        pdf_bytes = pdf.bytes.len(),
        docx_bytes = docx_bytes.len(),
        "Resume artifacts written"
    );

    Ok(ExportedResume {
        downloads: vec![
            build_download_link(&pdf_path, "Download PDF", PDF_MIME_SUFFIX)?,
            build_download_link(&docx_path, "Download Word Document", DOCX_MIME_SUFFIX)?,
        ],
        dropped_characters: pdf.dropped_characters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_writes_both_artifacts_with_fixed_names() {
        let dir = tempfile::tempdir().unwrap();
        let exported = export_resume(
            "EXPERIENCE\n• Built a thing\n-----\nDid work.",
            &HeaderBlock::placeholder(),
            dir.path(),
        )
        .unwrap();

        assert!(dir.path().join(PDF_FILENAME).is_file());
        assert!(dir.path().join(DOCX_FILENAME).is_file());
        let names: Vec<_> = exported.downloads.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(names, vec![PDF_FILENAME, DOCX_FILENAME]);
        assert!(exported.downloads[0].href.starts_with("data:application/pdf;base64,"));
        assert_eq!(exported.dropped_characters, 0);
    }

    #[test]
    fn test_export_reports_dropped_characters() {
        let dir = tempfile::tempdir().unwrap();
        let exported =
            export_resume("SKILLS\n• Rust 🦀 Go", &HeaderBlock::placeholder(), dir.path()).unwrap();
        assert_eq!(exported.dropped_characters, 1);
    }

    #[test]
    fn test_export_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = export_resume("x", &HeaderBlock::placeholder(), &missing).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
