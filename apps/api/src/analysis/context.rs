//! Transcript context extraction — entities, keywords and noun phrases.

use serde::Serialize;

use crate::matching::extractor::{keywords_from_annotation, KeywordExtractor};

#[derive(Debug, Clone, Serialize)]
pub struct ExtractedContext {
    pub entities: Vec<String>,
    pub keywords: Vec<String>,
    pub phrases: Vec<String>,
}

/// One annotation pass feeds all three views of the transcript.
pub fn extract_context(extractor: &KeywordExtractor, transcript: &str) -> ExtractedContext {
    let annotation = extractor.annotate(transcript);

    ExtractedContext {
        entities: annotation.entities.iter().map(|e| e.text.clone()).collect(),
        keywords: keywords_from_annotation(&annotation, extractor.vocabulary()),
        phrases: annotation.noun_chunks(),
    }
}
