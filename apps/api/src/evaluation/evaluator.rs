//! Evaluator — runs one resume vs job description evaluation end to end.
//!
//! Flow: input check → similarity score → verdict → skill gaps → suggestions.
//! Any failure aborts the whole evaluation; there are no partial results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::embedding::Embedder;
use crate::errors::AppError;
use crate::evaluation::similarity::similarity_score;
use crate::evaluation::skills::{jd_skills, missing_skills, SkillMatchMode, SKILL_VOCABULARY};
use crate::evaluation::suggestions::build_suggestions;
use crate::evaluation::verdict::Verdict;

/// The outcome of a single evaluation. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub evaluation_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    /// 0.00 – 100.00
    pub score: f64,
    pub verdict: Verdict,
    /// Vocabulary skills the JD asks for.
    pub matched_skills: Vec<String>,
    /// JD skills absent from the resume, in vocabulary order.
    pub missing_skills: Vec<String>,
    pub suggestions: String,
    pub embedding_model: String,
}

/// Scores `resume_text` against `jd_text`.
///
/// Blank inputs are rejected with `MissingInput` before any embedding work.
pub async fn evaluate(
    resume_text: &str,
    jd_text: &str,
    embedder: &dyn Embedder,
    match_mode: SkillMatchMode,
) -> Result<EvaluationResult, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::MissingInput(
            "Resume contains no readable text".to_string(),
        ));
    }
    if jd_text.trim().is_empty() {
        return Err(AppError::MissingInput(
            "Job description contains no readable text".to_string(),
        ));
    }

    let evaluation_id = Uuid::new_v4();
    info!(
        "Evaluation {evaluation_id}: resume {} chars, JD {} chars",
        resume_text.len(),
        jd_text.len()
    );

    let score = similarity_score(resume_text, jd_text, embedder).await?;
    let verdict = Verdict::from_score(score);

    let matched_skills = jd_skills(jd_text, SKILL_VOCABULARY, match_mode);
    let missing_skills = missing_skills(resume_text, jd_text, SKILL_VOCABULARY, match_mode);
    let suggestions = build_suggestions(&missing_skills);

    info!(
        "Evaluation {evaluation_id}: score={score:.2} ({verdict}), missing={}",
        missing_skills.len()
    );

    Ok(EvaluationResult {
        evaluation_id,
        evaluated_at: Utc::now(),
        score,
        verdict,
        matched_skills,
        missing_skills,
        suggestions,
        embedding_model: embedder.model_name().to_string(),
    })
}
