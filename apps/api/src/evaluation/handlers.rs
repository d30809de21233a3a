//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::evaluation::evaluator::{evaluate, EvaluationResult};
use crate::evaluation::skills::{SkillMatchMode, SKILL_VOCABULARY};
use crate::extraction::{extract_in_background, Document, DocumentFormat};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EvaluateTextRequest {
    pub resume_text: String,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: &'static [&'static str],
    pub match_mode: SkillMatchMode,
}

/// Which slot an uploaded file fills. Each slot accepts a fixed set of formats.
#[derive(Debug, Clone, Copy)]
enum UploadRole {
    Resume,
    JobDescription,
}

impl UploadRole {
    fn accepts(self, format: DocumentFormat) -> bool {
        match self {
            UploadRole::Resume => matches!(format, DocumentFormat::Pdf | DocumentFormat::Docx),
            UploadRole::JobDescription => {
                matches!(format, DocumentFormat::Pdf | DocumentFormat::PlainText)
            }
        }
    }

    fn describe(self) -> &'static str {
        match self {
            UploadRole::Resume => "Resume must be a PDF or DOCX file",
            UploadRole::JobDescription => "Job description file must be a TXT or PDF file",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/evaluations
///
/// Multipart fields: `resume` (file), `jd_file` (file, optional), `jd_text` (optional).
/// A job description file takes precedence over pasted text.
pub async fn handle_evaluate_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EvaluationResult>, AppError> {
    let mut resume: Option<Document> = None;
    let mut jd_file: Option<Document> = None;
    let mut jd_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => resume = read_upload(field, UploadRole::Resume).await?,
            "jd_file" => jd_file = read_upload(field, UploadRole::JobDescription).await?,
            "jd_text" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable jd_text: {e}")))?;
                jd_text = Some(text);
            }
            other => debug!("Ignoring unknown multipart field '{other}'"),
        }
    }

    let pasted_jd = jd_text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let resume = resume.ok_or_else(|| {
        AppError::MissingInput("Please upload a resume (PDF or DOCX)".to_string())
    })?;
    let jd_text = match (jd_file, pasted_jd) {
        (Some(document), _) => extract_in_background(document).await?,
        (None, Some(text)) => text,
        (None, None) => {
            return Err(AppError::MissingInput(
                "Please provide a job description as a file or as text".to_string(),
            ))
        }
    };
    let resume_text = extract_in_background(resume).await?;

    let result = evaluate(
        &resume_text,
        &jd_text,
        state.embedder.as_ref(),
        state.config.skill_match_mode,
    )
    .await?;

    Ok(Json(result))
}

/// POST /api/v1/evaluations/text
///
/// Same evaluation for callers that already hold both texts.
pub async fn handle_evaluate_text(
    State(state): State<AppState>,
    Json(request): Json<EvaluateTextRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    let result = evaluate(
        &request.resume_text,
        &request.jd_text,
        state.embedder.as_ref(),
        state.config.skill_match_mode,
    )
    .await?;

    Ok(Json(result))
}

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    Json(SkillsResponse {
        skills: SKILL_VOCABULARY,
        match_mode: state.config.skill_match_mode,
    })
}

/// Reads one file field. A part with no file name and no bytes (an empty
/// file input in an HTML form) counts as absent.
async fn read_upload(
    field: Field<'_>,
    role: UploadRole,
) -> Result<Option<Document>, AppError> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let content = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

    if content.is_empty() && file_name.as_deref().unwrap_or_default().is_empty() {
        return Ok(None);
    }

    let format = DocumentFormat::detect(content_type.as_deref(), file_name.as_deref())?;
    if !role.accepts(format) {
        return Err(AppError::Validation(format!(
            "{} (got {})",
            role.describe(),
            format.label()
        )));
    }

    debug!(
        "Received {:?} upload {:?} ({} bytes, {})",
        role,
        file_name.unwrap_or_default(),
        content.len(),
        format.label()
    );
    Ok(Some(Document::new(format, content)))
}
