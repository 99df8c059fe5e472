use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::matching::vocabulary::{Vocabulary, DEFAULT_SOFT_SKILLS, DEFAULT_TECHNOLOGY};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost,http://localhost:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub completion_api_url: String,
    pub completion_model: String,
    pub port: u16,
    pub rust_log: String,
    pub data_dir: String,
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub vocabulary: Vocabulary,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let technology = optional_env("TECH_VOCABULARY")
            .map(|raw| split_list(&raw))
            .unwrap_or_else(|| DEFAULT_TECHNOLOGY.iter().map(|s| s.to_string()).collect());
        let soft_skills = optional_env("SOFT_SKILL_VOCABULARY")
            .map(|raw| split_list(&raw))
            .unwrap_or_else(|| DEFAULT_SOFT_SKILLS.iter().map(|s| s.to_string()).collect());

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            completion_api_url: optional_env("COMPLETION_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            completion_model: optional_env("COMPLETION_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port: optional_env("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            data_dir: optional_env("DATA_DIR").unwrap_or_else(|| ".".to_string()),
            cors_origins: split_list(
                &optional_env("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            vocabulary: Vocabulary::new(technology, soft_skills),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank variables both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Splits a comma-separated list, trimming items and dropping blanks.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
