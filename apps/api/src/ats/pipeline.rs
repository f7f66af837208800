//! Analysis run: extract → analyse → rewrite → render → link.
//!
//! One request runs its steps strictly in order. Any LLM failure stops the run and no
//! partial output is returned. Artifacts live in a per-request temporary directory that
//! is removed once the links (which embed the file contents) have been built.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::ats::extractor::extract_pdf_text;
use crate::ats::feedback::{parse_feedback, AtsFeedback};
use crate::ats::prompts::{analysis_prompt, rewrite_prompt};
use crate::errors::AppError;
use crate::layout::HeaderBlock;
use crate::llm_client::TextGenerator;
use crate::render::download::DownloadLink;
use crate::render::{export_resume, ExportedResume};

/// Inputs collected from the form.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_pdf: Option<Bytes>,
    pub job_description: String,
    pub header: HeaderBlock,
}

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub request_id: Uuid,
    /// The analysis response exactly as the model returned it.
    pub analysis_raw: String,
    pub analysis: Option<AtsFeedback>,
    pub updated_resume: String,
    /// Characters the PDF could not represent and silently left out.
    pub dropped_characters: usize,
    pub downloads: Vec<DownloadView>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DownloadView {
    #[serde(flatten)]
    pub link: DownloadLink,
    pub html: String,
}

impl From<DownloadLink> for DownloadView {
    fn from(link: DownloadLink) -> Self {
        let html = link.to_html();
        Self { link, html }
    }
}

#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn run_analysis(
    llm: &dyn TextGenerator,
    request: AnalysisRequest,
    output_root: &Path,
    request_id: Uuid,
) -> Result<AnalysisReport, AppError> {
    let resume_pdf = match request.resume_pdf {
        Some(pdf) if !pdf.is_empty() && !request.job_description.trim().is_empty() => pdf,
        _ => {
            warn!("Analysis requested without a resume file or job description");
            return Err(AppError::MissingInput);
        }
    };
    let job_description = request.job_description;

    let resume_text = tokio::task::spawn_blocking(move || extract_pdf_text(&resume_pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))??;
    info!(chars = resume_text.len(), "Resume text extracted");

    let analysis_raw = llm
        .generate(&analysis_prompt(&resume_text, &job_description))
        .await?;
    let analysis = parse_feedback(&analysis_raw);
    info!(structured = analysis.is_some(), "ATS analysis received");

    let updated_resume = llm
        .generate(&rewrite_prompt(&resume_text, &job_description))
        .await?;
    info!(chars = updated_resume.len(), "Updated resume received");

    let exported = export_in_scratch_dir(
        updated_resume.clone(),
        request.header,
        output_root.to_path_buf(),
    )
    .await?;

    Ok(AnalysisReport {
        request_id,
        analysis_raw,
        analysis,
        updated_resume,
        dropped_characters: exported.dropped_characters,
        downloads: exported.downloads.into_iter().map(DownloadView::from).collect(),
        generated_at: Utc::now(),
    })
}

async fn export_in_scratch_dir(
    text: String,
    header: HeaderBlock,
    output_root: PathBuf,
) -> Result<ExportedResume, AppError> {
    tokio::task::spawn_blocking(move || -> Result<ExportedResume, AppError> {
        let scratch = tempfile::Builder::new()
            .prefix("smart-ats-")
            .tempdir_in(&output_root)?;
        let exported = export_resume(&text, &header, scratch.path())?;
        scratch.close()?;
        Ok(exported)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in rendering: {e}")))?
}
