//! Interview question generation from a conversation context and a job description.

use tracing::info;

use crate::analysis::prompts::QUESTIONS_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::{flatten_newlines, render};
use crate::llm_client::{split_lines, Completer, Sampling};

pub fn build_questions_prompt(context: &str, job_description: &str) -> String {
    render(
        QUESTIONS_PROMPT_TEMPLATE,
        &[
            ("context", &flatten_newlines(context)),
            ("job_description", &flatten_newlines(job_description)),
        ],
    )
}

pub async fn generate_questions(
    completer: &dyn Completer,
    context: &str,
    job_description: &str,
) -> Result<Vec<String>, AppError> {
    let prompt = build_questions_prompt(context, job_description);
    let text = completer
        .complete(&prompt, &Sampling::SHORT)
        .await
        .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;

    let questions = split_lines(&text);
    info!(count = questions.len(), "Generated interview questions");
    Ok(questions)
}
