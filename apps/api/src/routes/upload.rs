//! Multipart request reading shared by every upload endpoint.

use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use tracing::debug;

use crate::documents::UploadedFile;
use crate::errors::AppError;

/// A multipart body split into file parts and plain text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub files: Vec<UploadedFile>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// The one file an upload endpoint expects.
    pub fn single_file(mut self) -> Result<UploadedFile, AppError> {
        match self.files.len() {
            1 => Ok(self.files.remove(0)),
            0 => Err(AppError::Validation(
                "no file was uploaded (expected a multipart 'file' part)".to_string(),
            )),
            n => Err(AppError::Validation(format!(
                "expected exactly one file, got {n}"
            ))),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Reads every part of `multipart`. Parts with a filename are files; the rest
/// are text fields keyed by part name.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let data = field.bytes().await.map_err(multipart_error)?;
                debug!("Received file part '{name}': {filename} ({} bytes)", data.len());
                form.files.push(UploadedFile { filename, data });
            }
            None => {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }
    }
    Ok(form)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("invalid multipart body: {}", err.body_text()))
    }
}
