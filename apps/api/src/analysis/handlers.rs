//! Axum route handlers for transcript analysis, question generation and comparison.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::comparison::{compare_documents, ComparisonReport};
use crate::analysis::context::{extract_context, ExtractedContext};
use crate::analysis::questions::generate_questions;
use crate::documents::upload::UploadForm;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractContextRequest {
    pub transcript: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractContextResponse {
    pub context: ExtractedContext,
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub context: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /extract-context
///
/// Entities, keywords and noun phrases from an interview transcript.
pub async fn handle_extract_context(
    State(state): State<AppState>,
    Json(request): Json<ExtractContextRequest>,
) -> Result<Json<ExtractContextResponse>, AppError> {
    if request.transcript.trim().is_empty() {
        return Err(AppError::Validation("transcript cannot be empty".to_string()));
    }

    let extractor = Arc::clone(&state.extractor);
    let context = tokio::task::spawn_blocking(move || {
        extract_context(&extractor, &request.transcript)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("context extraction task failed: {e}")))?;
    info!(
        entities = context.entities.len(),
        keywords = context.keywords.len(),
        phrases = context.phrases.len(),
        "Extracted transcript context"
    );

    Ok(Json(ExtractContextResponse { context }))
}

/// POST /generate-questions
///
/// Interview questions for a candidate, from the conversation context and the job description.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    if request.context.trim().is_empty() {
        return Err(AppError::Validation("context cannot be empty".to_string()));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let questions = generate_questions(
        state.completer.as_ref(),
        &request.context,
        &request.job_description,
    )
    .await?;

    Ok(Json(GenerateQuestionsResponse { questions }))
}

/// POST /get-job-description-and-cv
///
/// Summarises both uploads and reports how the CV matches the job description.
/// The extracted texts are saved for `GET /get-job-description-local`.
pub async fn handle_compare(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ComparisonReport>, AppError> {
    let mut form = UploadForm::from_multipart(multipart).await?;
    let job_description_file = form.take_file("job_description_file")?;
    let cv_file = form.take_file("cv_file")?;

    let report = compare_documents(
        state.completer.as_ref(),
        &state.store,
        job_description_file,
        cv_file,
    )
    .await?;

    Ok(Json(report))
}
