//! Axum route handlers for the analysis API.

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use bytes::Bytes;
use uuid::Uuid;

use crate::ats::pipeline::{run_analysis, AnalysisReport, AnalysisRequest};
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart form fields accepted by `POST /api/v1/analyze`.
#[derive(Debug, Default)]
struct AnalyzeForm {
    resume: Option<Bytes>,
    job_description: String,
    candidate_name: Option<String>,
    candidate_contact: Option<String>,
    candidate_links: Option<String>,
}

/// POST /api/v1/analyze
///
/// Multipart: `resume` (PDF file), `job_description` (text), and optional
/// `candidate_name` / `candidate_contact` / `candidate_links` header overrides.
/// Runs the full analysis and returns the report with both download links.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let form = read_form(multipart).await?;

    let header = state.config.header.clone().with_overrides(
        form.candidate_name,
        form.candidate_contact,
        form.candidate_links,
    );
    let request = AnalysisRequest {
        resume_pdf: form.resume,
        job_description: form.job_description,
        header,
    };

    let report = run_analysis(
        state.llm.as_ref(),
        request,
        &state.config.output_dir,
        Uuid::new_v4(),
    )
    .await?;

    Ok(Json(report))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume upload: {e}")))?;
                form.resume = Some(data);
            }
            "job_description" => form.job_description = read_text(field).await?,
            "candidate_name" => form.candidate_name = Some(read_text(field).await?),
            "candidate_contact" => form.candidate_contact = Some(read_text(field).await?),
            "candidate_links" => form.candidate_links = Some(read_text(field).await?),
            other => tracing::debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read field '{name}': {e}")))
}
