//! Upload storage for profile and product images.
//!
//! Files land in one configured directory and are referenced everywhere by a
//! server-relative path (`static/uploads/<name>`); responses turn that into
//! an absolute URL at read time. Filenames are sanitized before storage, but
//! no size or content-type validation is applied.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Public URL prefix under which the upload directory is served.
pub const PUBLIC_PREFIX: &str = "static/uploads";

/// Errors that can occur while storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The filename sanitized down to nothing.
    #[error("invalid file name")]
    InvalidFileName,

    /// Writing the file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stores uploaded files under a single directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Create an upload store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory uploads are written to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if the directory cannot be created.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write an upload and return its server-relative path.
    ///
    /// An upload with the same (sanitized) name overwrites the previous file.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::InvalidFileName` if nothing survives
    /// sanitization, or `UploadError::Io` if the write fails.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String, UploadError> {
        let name = sanitize_file_name(file_name).ok_or(UploadError::InvalidFileName)?;
        tokio::fs::write(self.root.join(&name), bytes).await?;
        Ok(format!("{PUBLIC_PREFIX}/{name}"))
    }

    /// Best-effort removal of a previously stored file.
    ///
    /// Missing files and IO failures are logged and ignored; a stale image on
    /// disk never fails the request that replaced it.
    pub async fn remove(&self, stored_path: &str) {
        let Some(name) = Path::new(stored_path).file_name() else {
            return;
        };
        if let Err(e) = tokio::fs::remove_file(self.root.join(name)).await {
            tracing::debug!(path = stored_path, error = %e, "could not remove stored file");
        }
    }
}

/// Sanitize a client-supplied filename for storage.
///
/// Keeps only the final path component, replaces whitespace with `_`, drops
/// every character outside `[A-Za-z0-9._-]`, and strips leading dots. Returns
/// `None` if nothing usable remains.
#[must_use]
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
