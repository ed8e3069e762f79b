//! Multipart form collection.
//!
//! The profile and product endpoints accept `multipart/form-data` with a mix
//! of text fields and at most one file per field name. This collector drains
//! the whole request body up front so handlers can look fields up by name.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::error::ApiError;

/// An uploaded file captured from a multipart field.
#[derive(Debug)]
pub struct UploadedFile {
    /// Client-supplied filename, not yet sanitized.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Bytes,
}

/// All fields of a multipart request, keyed by field name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Drain a multipart body into a form.
    ///
    /// Fields with a filename are collected as files; fields with an empty
    /// filename (a file input left blank) are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the body is not valid multipart.
    pub async fn collect(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };

            match field.file_name().map(ToString::to_string) {
                Some(file_name) if !file_name.is_empty() => {
                    let bytes = field.bytes().await?;
                    form.files.insert(name, UploadedFile { file_name, bytes });
                }
                Some(_) => {}
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Get a text field, treating empty strings as absent.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Take an uploaded file out of the form.
    #[must_use]
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}
