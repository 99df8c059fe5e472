//! Keyword Extractor — turns free-form text into an ordered keyword sequence.
//!
//! Output blocks, in this order:
//! 1. DATE entities whose text contains "year" (years-of-experience mentions)
//! 2. tokens matching the technology vocabulary, lowercased
//! 3. tokens matching the soft-skill vocabulary, lowercased
//! 4. noun and proper-noun tokens, surface form
//!
//! Duplicates are kept. Generic nouns are NOT lowercased, so "Python" (noun block)
//! and "python" (technology block) are distinct keywords downstream.

use std::sync::Arc;

use crate::matching::annotator::{Annotation, Annotator, EntityLabel};
use crate::matching::vocabulary::Vocabulary;

/// Extraction is a pure function of the text; the annotator is the only
/// heavyweight resource and is shared behind an `Arc`.
#[derive(Clone)]
pub struct KeywordExtractor {
    annotator: Arc<dyn Annotator>,
    vocabulary: Vocabulary,
}

impl KeywordExtractor {
    pub fn new(annotator: Arc<dyn Annotator>, vocabulary: Vocabulary) -> Self {
        Self {
            annotator,
            vocabulary,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn annotate(&self, text: &str) -> Annotation {
        self.annotator.annotate(text)
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        keywords_from_annotation(&self.annotate(text), &self.vocabulary)
    }
}

/// Builds the keyword sequence from an existing annotation.
pub fn keywords_from_annotation(annotation: &Annotation, vocabulary: &Vocabulary) -> Vec<String> {
    // Case-sensitive: "5 Years" is a DATE but not an experience mention.
    let experience = annotation
        .entities
        .iter()
        .filter(|e| e.label == EntityLabel::Date && e.text.contains("year"))
        .map(|e| e.text.clone());

    let technology = annotation
        .tokens
        .iter()
        .filter(|t| vocabulary.is_technology(&t.lower))
        .map(|t| t.lower.clone());

    let soft_skills = annotation
        .tokens
        .iter()
        .filter(|t| vocabulary.is_soft_skill(&t.lower))
        .map(|t| t.lower.clone());

    let nouns = annotation
        .tokens
        .iter()
        .filter(|t| t.pos.is_nominal())
        .map(|t| t.text.clone());

    experience
        .chain(technology)
        .chain(soft_skills)
        .chain(nouns)
        .collect()
}
