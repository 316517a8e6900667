//! Axum route handlers for the Resume API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::generator::{
    generate_structured_resume, tailor_resume, GenerateRequest, GenerationOutcome, TailorRequest,
};
use crate::models::resume::Resume;
use crate::render::{RenderFormat, RenderOutput};
use crate::schema::{normalize, validate, FallbackProfile, ValidationReport};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub raw: Value,
    #[serde(default)]
    pub fallback_profile: Value,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub resume_data: Value,
}

/// Success status object for the generation endpoints.
#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub outcome: GenerationOutcome,
}

impl From<GenerationOutcome> for GenerationResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        Self {
            status: "success",
            outcome,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Raw candidate data → content generator → normalized resume.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    let Json(request) = payload?;
    if request.target_role.trim().is_empty() {
        return Err(AppError::Validation("target_role cannot be empty".to_string()));
    }

    let outcome = generate_structured_resume(state.generator.as_ref(), &request).await?;

    Ok(Json(outcome.into()))
}

/// POST /api/v1/resumes/tailor
///
/// Rewrites an existing resume for a job description. Contact details of the
/// existing resume are kept when the generator drops them.
pub async fn handle_tailor(
    State(state): State<AppState>,
    payload: Result<Json<TailorRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    let Json(request) = payload?;
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation("job_description cannot be empty".to_string()));
    }
    if request.target_role.trim().is_empty() {
        return Err(AppError::Validation("target_role cannot be empty".to_string()));
    }
    if !request.existing_resume.is_object() {
        return Err(AppError::Validation(
            "existing_resume must be a JSON object".to_string(),
        ));
    }

    let outcome = tailor_resume(state.generator.as_ref(), &request).await?;

    Ok(Json(outcome.into()))
}

/// POST /api/v1/resumes/normalize
///
/// Runs the schema normalizer alone. Never fails for an object input.
pub async fn handle_normalize(
    payload: Result<Json<NormalizeRequest>, JsonRejection>,
) -> Result<Json<Resume>, AppError> {
    let Json(request) = payload?;
    let Some(raw) = request.raw.as_object() else {
        return Err(AppError::Validation("raw must be a JSON object".to_string()));
    };
    let fallback = FallbackProfile::from_value(&request.fallback_profile);

    Ok(Json(normalize(raw, &fallback)))
}

/// POST /api/v1/resumes/validate
///
/// Advisory presence check of the seven top-level fields.
pub async fn handle_validate(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ValidationReport>, AppError> {
    let Json(doc) = payload?;
    Ok(Json(validate(&doc)))
}

/// POST /api/v1/resumes/render/pdf
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let doc = prepare_document(&request.resume_data)?;
    let filename = pdf_filename(&doc.header.name, Utc::now());

    let output = state
        .renderer
        .clone()
        .render_blocking(doc, RenderFormat::Pdf, state.config.render_timeout)
        .await?;
    let RenderOutput::Pdf(bytes) = output else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "renderer returned non-PDF output for a PDF request"
        )));
    };
    info!("Rendered PDF {filename} ({} bytes)", bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// POST /api/v1/resumes/render/html
pub async fn handle_render_html(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Html<String>, AppError> {
    let Json(request) = payload?;
    let doc = prepare_document(&request.resume_data)?;

    let output = state
        .renderer
        .clone()
        .render_blocking(doc, RenderFormat::Html, state.config.render_timeout)
        .await?;
    let RenderOutput::Html(html) = output else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "renderer returned non-HTML output for an HTML request"
        )));
    };

    Ok(Html(html))
}

/// Advisory validation, then normalization with an empty fallback.
fn prepare_document(resume_data: &Value) -> Result<Resume, AppError> {
    let Some(raw) = resume_data.as_object() else {
        return Err(AppError::Validation(
            "resume_data must be a JSON object".to_string(),
        ));
    };

    let report = validate(resume_data);
    if !report.valid {
        warn!("Rendering incomplete resume: {}", report.message);
    }

    Ok(normalize(raw, &FallbackProfile::default()))
}

/// `jane_doe_20240131_094500.pdf`; ASCII only so it is always a valid header.
fn pdf_filename(name: &str, at: DateTime<Utc>) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let slug = if slug.is_empty() { "resume".to_string() } else { slug };
    format!("{slug}_{}.pdf", at.format("%Y%m%d_%H%M%S"))
}
