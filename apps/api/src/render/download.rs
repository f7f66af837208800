//! Download links — a finished artifact inlined as a base64 `data:` URI.

use std::io;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

pub const PDF_MIME_SUFFIX: &str = "pdf";
pub const DOCX_MIME_SUFFIX: &str = "vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A self-contained download link for one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub label: String,
    pub filename: String,
    /// `data:application/<suffix>;base64,<contents>`
    pub href: String,
}

impl DownloadLink {
    /// `<a href="data:..." download="name">label</a>`
    pub fn to_html(&self) -> String {
        format!(
            r#"<a href="{}" download="{}">{}</a>"#,
            self.href, self.filename, self.label
        )
    }
}

/// Reads the whole file at `path` and encodes it as a downloadable link.
/// A missing file surfaces as the underlying `io::Error`.
pub fn build_download_link(path: &Path, label: &str, mime_suffix: &str) -> io::Result<DownloadLink> {
    let contents = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(DownloadLink {
        label: label.to_string(),
        filename,
        href: format!(
            "data:application/{mime_suffix};base64,{}",
            STANDARD.encode(contents)
        ),
    })
}
