//! Local persistence of the most recent job description and CV text.
//!
//! One file per kind under the data directory, replaced on every save. Writes go
//! to a temp file first and are renamed into place, so readers never see a
//! partially written file.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no {0} has been saved yet")]
    NotFound(&'static str),

    #[error("text store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    JobDescription,
    Cv,
}

impl TextKind {
    fn file_name(self) -> &'static str {
        match self {
            TextKind::JobDescription => "job_description.txt",
            TextKind::Cv => "cv.txt",
        }
    }

    fn label(self) -> &'static str {
        match self {
            TextKind::JobDescription => "job description",
            TextKind::Cv => "CV",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredText {
    pub text: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TextStore {
    dir: PathBuf,
}

impl TextStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, kind: TextKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    pub async fn save(&self, kind: TextKind, text: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let target = self.path_for(kind);
        let temp = self.dir.join(format!(
            ".{}.{}.{}.tmp",
            kind.file_name(),
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        tokio::fs::write(&temp, text).await?;
        if let Err(e) = tokio::fs::rename(&temp, &target).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        debug!(path = %target.display(), chars = text.len(), "Saved {}", kind.label());
        Ok(())
    }

    pub async fn load(&self, kind: TextKind) -> Result<StoredText, StoreError> {
        let path = self.path_for(kind);

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(kind.label()))
            }
            Err(e) => return Err(e.into()),
        };
        let modified = tokio::fs::metadata(&path).await?.modified()?;

        Ok(StoredText {
            text,
            saved_at: DateTime::<Utc>::from(modified),
        })
    }
}
