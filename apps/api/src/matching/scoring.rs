//! Match Scorer — percentage of job keywords also found in the candidate document.

use thiserror::Error;

use crate::matching::similarity::find_similar_keywords;

/// Inclusive acceptance threshold, in percent.
pub const MATCH_THRESHOLD_PERCENT: f64 = 50.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("job description produced no keywords; a match score cannot be computed")]
    EmptyReferenceSet,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    /// In [0, 100], rounded to 2 decimals.
    pub match_score_percent: f64,
    pub is_match: bool,
}

/// Scores `cv` against `job`.
///
/// score = |similar(cv, job)| / |job| * 100, where |job| counts duplicates.
/// An empty `job` sequence is rejected with `EmptyReferenceSet`.
pub fn score_match<A, B>(cv: &[A], job: &[B]) -> Result<MatchResult, MatchError>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    if job.is_empty() {
        return Err(MatchError::EmptyReferenceSet);
    }

    let shared = find_similar_keywords(cv, job).len();
    let match_score_percent = round2(shared as f64 / job.len() as f64 * 100.0);

    Ok(MatchResult {
        match_score_percent,
        is_match: match_score_percent >= MATCH_THRESHOLD_PERCENT,
    })
}

/// Rounds to 2 decimals from the exact binary value, ties to even.
/// Scaling by 100 first would add its own error and push 49.995 up to 50.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
