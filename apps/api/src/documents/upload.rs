//! Multipart form collection for upload endpoints.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// An uploaded file part.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub data: Bytes,
}

/// All parts of a multipart request: parts carrying a filename are files, the
/// rest are text fields. A repeated field name keeps the last part.
#[derive(Debug, Default)]
pub struct UploadForm {
    files: HashMap<String, Upload>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let data = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read file '{name}': {e}"))
                    })?;
                    form.files.insert(name, Upload { filename, data });
                }
                None => {
                    let value = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read field '{name}': {e}"))
                    })?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn take_file(&mut self, name: &str) -> Result<Upload, AppError> {
        self.files
            .remove(name)
            .ok_or_else(|| AppError::Validation(format!("Missing file field '{name}'")))
    }

    /// Text fields may be empty; only absence is an error.
    pub fn take_text(&mut self, name: &str) -> Result<String, AppError> {
        self.fields
            .remove(name)
            .ok_or_else(|| AppError::Validation(format!("Missing form field '{name}'")))
    }
}
