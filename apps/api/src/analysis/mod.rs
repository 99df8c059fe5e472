// Interview analysis: transcript context extraction, question generation and
// job/CV comparison. All LLM calls go through llm_client::Completer.

pub mod comparison;
pub mod context;
pub mod handlers;
pub mod prompts;
pub mod questions;
