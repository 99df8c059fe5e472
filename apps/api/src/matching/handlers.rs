//! Axum route handler for CV ↔ job description keyword matching.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::documents::extract::extract_text;
use crate::documents::upload::UploadForm;
use crate::errors::AppError;
use crate::matching::scoring::score_match;
use crate::matching::similarity::find_similar_keywords;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub similar_keywords: Vec<String>,
    pub match_score: f64,
    pub is_match: bool,
}

/// POST /match
///
/// Multipart: `cv_file` (pdf or docx) and `job_description` (text).
/// An empty job description yields no keywords and is rejected with 422.
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let mut form = UploadForm::from_multipart(multipart).await?;
    let cv_file = form.take_file("cv_file")?;
    let job_description = form.take_text("job_description")?;

    let cv_text = extract_text(&cv_file.filename, cv_file.data).await?;

    // Annotation is CPU-bound and linear in the upload size.
    let extractor = Arc::clone(&state.extractor);
    let (cv_keywords, job_keywords) = tokio::task::spawn_blocking(move || {
        (extractor.extract(&cv_text), extractor.extract(&job_description))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("keyword extraction task failed: {e}")))?;

    let similar = find_similar_keywords(&cv_keywords, &job_keywords);
    let result = score_match(&cv_keywords, &job_keywords)?;

    info!(
        cv_keywords = cv_keywords.len(),
        job_keywords = job_keywords.len(),
        shared = similar.len(),
        score = result.match_score_percent,
        is_match = result.is_match,
        "Scored CV against job description"
    );

    Ok(Json(MatchResponse {
        similar_keywords: similar.into_iter().collect(),
        match_score: result.match_score_percent,
        is_match: result.is_match,
    }))
}
