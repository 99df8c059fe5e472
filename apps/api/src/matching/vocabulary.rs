//! Fixed keyword vocabularies used by the extractor.
//!
//! Kept as plain ordered string lists so they can be overridden from configuration
//! without touching extraction code.

pub const DEFAULT_TECHNOLOGY: &[&str] = &["python", "java", "javascript", "sql", "html", "css"];

pub const DEFAULT_SOFT_SKILLS: &[&str] = &[
    "communication",
    "leadership",
    "teamwork",
    "problem-solving",
    "creativity",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub technology: Vec<String>,
    pub soft_skills: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            technology: DEFAULT_TECHNOLOGY.iter().map(|s| s.to_string()).collect(),
            soft_skills: DEFAULT_SOFT_SKILLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Vocabulary {
    /// Builds a vocabulary from raw term lists. Terms are trimmed and lowercased;
    /// blanks are dropped. Order is preserved.
    pub fn new<I, J, S, T>(technology: I, soft_skills: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            technology: normalize_terms(technology),
            soft_skills: normalize_terms(soft_skills),
        }
    }

    pub fn is_technology(&self, lower: &str) -> bool {
        self.technology.iter().any(|t| t == lower)
    }

    pub fn is_soft_skill(&self, lower: &str) -> bool {
        self.soft_skills.iter().any(|t| t == lower)
    }
}

fn normalize_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
