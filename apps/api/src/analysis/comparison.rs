//! Job description vs CV comparison through the completion service.
//!
//! Both documents are extracted and saved to the text store, summarised by two
//! concurrent completions, and the summaries are compared by a third.

use serde::Serialize;
use tracing::info;

use crate::analysis::prompts::{
    COMPARISON_PROMPT_TEMPLATE, CV_SUMMARY_PROMPT_TEMPLATE, JOB_SUMMARY_PROMPT_TEMPLATE,
};
use crate::documents::extract::extract_text;
use crate::documents::store::{TextKind, TextStore};
use crate::documents::upload::Upload;
use crate::errors::AppError;
use crate::llm_client::prompts::{flatten_newlines, render};
use crate::llm_client::{split_lines, Completer, Sampling};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub job_description_summary: Vec<String>,
    pub cv_summary: Vec<String>,
    pub analysis: Vec<String>,
}

pub async fn compare_documents(
    completer: &dyn Completer,
    store: &TextStore,
    job_description_file: Upload,
    cv_file: Upload,
) -> Result<ComparisonReport, AppError> {
    let (job_text, cv_text) = tokio::try_join!(
        extract_text(&job_description_file.filename, job_description_file.data),
        extract_text(&cv_file.filename, cv_file.data),
    )?;

    store.save(TextKind::JobDescription, &job_text).await?;
    store.save(TextKind::Cv, &cv_text).await?;

    let job_prompt = render(
        JOB_SUMMARY_PROMPT_TEMPLATE,
        &[("job_description", &flatten_newlines(&job_text))],
    );
    let cv_prompt = render(CV_SUMMARY_PROMPT_TEMPLATE, &[("cv", &flatten_newlines(&cv_text))]);

    let (job_summary, cv_summary) = tokio::try_join!(
        completer.complete(&job_prompt, &Sampling::SHORT),
        completer.complete(&cv_prompt, &Sampling::SHORT),
    )
    .map_err(|e| AppError::Llm(format!("Document summary failed: {e}")))?;

    let job_description_summary = split_lines(&job_summary);
    let cv_summary = split_lines(&cv_summary);

    let comparison_prompt = build_comparison_prompt(&job_description_summary, &cv_summary);
    let analysis = completer
        .complete(&comparison_prompt, &Sampling::REPORT)
        .await
        .map_err(|e| AppError::Llm(format!("Comparison report failed: {e}")))?;

    let report = ComparisonReport {
        job_description_summary,
        cv_summary,
        analysis: split_lines(&analysis),
    };
    info!(
        job_lines = report.job_description_summary.len(),
        cv_lines = report.cv_summary.len(),
        analysis_lines = report.analysis.len(),
        "Compared job description with CV"
    );
    Ok(report)
}

pub fn build_comparison_prompt(job_summary: &[String], cv_summary: &[String]) -> String {
    render(
        COMPARISON_PROMPT_TEMPLATE,
        &[
            ("job_summary", &job_summary.join("\n")),
            ("cv_summary", &cv_summary.join("\n")),
        ],
    )
}
