//! Axum route handlers for job description upload and retrieval.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::documents::extract::extract_text;
use crate::documents::store::TextKind;
use crate::documents::upload::UploadForm;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobDescriptionResponse {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct StoredJobDescriptionResponse {
    pub job_description: String,
    pub saved_at: DateTime<Utc>,
}

/// POST /get-job-description
///
/// Returns the plain text of an uploaded job description file (pdf or docx).
pub async fn handle_get_job_description(
    multipart: Multipart,
) -> Result<Json<JobDescriptionResponse>, AppError> {
    let mut form = UploadForm::from_multipart(multipart).await?;
    let upload = form.take_file("job_description_file")?;

    let job_description = extract_text(&upload.filename, upload.data).await?;
    info!(chars = job_description.len(), "Extracted job description");

    Ok(Json(JobDescriptionResponse { job_description }))
}

/// GET /get-job-description-local
///
/// Returns the job description saved by the most recent comparison upload.
pub async fn handle_get_job_description_local(
    State(state): State<AppState>,
) -> Result<Json<StoredJobDescriptionResponse>, AppError> {
    let stored = state.store.load(TextKind::JobDescription).await?;

    Ok(Json(StoredJobDescriptionResponse {
        job_description: stored.text,
        saved_at: stored.saved_at,
    }))
}
