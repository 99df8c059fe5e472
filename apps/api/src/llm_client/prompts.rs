// Shared prompt constants and prompt-building utilities.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System message sent with every completion request.
pub const RECRUITER_SYSTEM: &str = "You are an experienced technical recruiter. \
    Answer in plain text, one item per line. \
    Base every statement only on the documents you are given; \
    do not invent experience, employers or skills.";

/// Collapses newlines to spaces so extracted document text sits on one prompt line.
pub fn flatten_newlines(text: &str) -> String {
    text.replace('\n', " ")
}

/// Fills `{name}` placeholders in a template. Unknown placeholders are left as-is.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}
