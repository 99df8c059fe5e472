//! Similarity Finder — keywords present in both sequences.

use std::collections::{BTreeSet, HashSet};

/// Returns the keywords common to `cv` and `job`, compared exactly as stored.
///
/// Set semantics: duplicates collapse. A `BTreeSet` keeps the response order stable.
pub fn find_similar_keywords<A, B>(cv: &[A], job: &[B]) -> BTreeSet<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let job_set: HashSet<&str> = job.iter().map(|k| k.as_ref()).collect();
    cv.iter()
        .map(|k| k.as_ref())
        .filter(|k| job_set.contains(k))
        .map(str::to_string)
        .collect()
}
