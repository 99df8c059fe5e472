// Keyword matching core: annotation, keyword extraction, similarity and scoring.
// Pure computation; the annotator is the only shared resource.

pub mod annotator;
pub mod extractor;
pub mod handlers;
pub mod scoring;
pub mod similarity;
pub mod vocabulary;
