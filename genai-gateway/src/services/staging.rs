//! Upload staging and the cleanup guarantee.
//!
//! A [`StagedUpload`] owns one file in the scratch directory. The file is
//! removed exactly once: by [`StagedUpload::release`] on the normal path, or
//! by `Drop` if the handle goes away unreleased (early return, panic, or the
//! request future being cancelled).

use crate::error::GenerateError;
use axum::body::Bytes;
use axum::extract::Multipart;
use futures::{Stream, StreamExt};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Used when a file part declares no content type.
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Writes uploads into a scratch directory under collision-free names.
#[derive(Debug, Clone)]
pub struct UploadStager {
    scratch_dir: PathBuf,
}

impl UploadStager {
    /// Create the stager, creating the scratch directory if needed.
    pub async fn new(scratch_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let scratch_dir = scratch_dir.into();
        fs::create_dir_all(&scratch_dir).await?;
        Ok(Self { scratch_dir })
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Stream `chunks` into a fresh scratch file.
    ///
    /// The returned handle is armed as soon as the file exists, so a failed
    /// write never leaves a partial file behind.
    pub async fn stage<S, E>(
        &self,
        field_name: &str,
        media_type: Option<&str>,
        chunks: S,
    ) -> Result<StagedUpload, GenerateError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Display,
    {
        let path = self.scratch_dir.join(Uuid::new_v4().simple().to_string());
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(GenerateError::Staging)?;

        let upload = StagedUpload {
            path,
            media_type: media_type
                .filter(|m| !m.is_empty())
                .unwrap_or(FALLBACK_MEDIA_TYPE)
                .to_string(),
            field_name: field_name.to_string(),
            released: false,
        };

        let size = write_chunks(file, chunks).await?;

        tracing::debug!(
            path = %upload.path.display(),
            field = %upload.field_name,
            media_type = %upload.media_type,
            size,
            "Upload staged"
        );

        Ok(upload)
    }
}

async fn write_chunks<S, E>(mut file: File, chunks: S) -> Result<u64, GenerateError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let mut chunks = std::pin::pin!(chunks);
    let mut size = 0u64;
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk
            .map_err(|e| GenerateError::InvalidInput(format!("Failed to read file part: {}", e)))?;
        file.write_all(&chunk).await.map_err(GenerateError::Staging)?;
        size += chunk.len() as u64;
    }
    file.flush().await.map_err(GenerateError::Staging)?;
    Ok(size)
}

/// A request-scoped file in the scratch directory.
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
    media_type: String,
    field_name: String,
    released: bool,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Content type declared by the client.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Remove the file. Failure is logged, never returned.
    pub async fn release(mut self) {
        self.released = true;
        match fs::remove_file(&self.path).await {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Staged upload removed"),
            Err(e) => log_cleanup_warning(&self.path, &e),
        }
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        // Drop cannot await; a single unlink on this rare path is cheap enough
        // to run on the worker thread.
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(
                path = %self.path.display(),
                "Staged upload removed on drop"
            ),
            Err(e) => log_cleanup_warning(&self.path, &e),
        }
    }
}

fn log_cleanup_warning(path: &Path, error: &std::io::Error) {
    tracing::warn!(
        path = %path.display(),
        error = %error,
        "Failed to remove staged upload"
    );
}

/// Fields collected from a multipart generation request.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub prompt: Option<String>,
    pub upload: Option<StagedUpload>,
}

impl UploadForm {
    /// Read every part of `multipart`, staging the one named `file_field`.
    ///
    /// Only `prompt` and `file_field` are kept; other parts are skipped. A
    /// second part under `file_field` is rejected. Whatever was staged is
    /// removed if reading fails.
    pub async fn read(
        mut multipart: Multipart,
        stager: &UploadStager,
        file_field: &str,
    ) -> Result<Self, GenerateError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            GenerateError::InvalidInput(format!("Failed to read multipart field: {}", e))
        })? {
            let name = field.name().unwrap_or_default().to_string();

            if name == file_field {
                if form.upload.is_some() {
                    return Err(GenerateError::InvalidInput(format!(
                        "More than one '{}' file part",
                        file_field
                    )));
                }
                let media_type = field.content_type().map(str::to_string);
                let staged = stager
                    .stage(file_field, media_type.as_deref(), field)
                    .await?;
                form.upload = Some(staged);
            } else if name == "prompt" {
                let prompt = field.text().await.map_err(|e| {
                    GenerateError::InvalidInput(format!("Failed to read prompt field: {}", e))
                })?;
                form.prompt = Some(prompt);
            } else {
                tracing::debug!(field = %name, "Skipping unexpected multipart field");
            }
        }

        Ok(form)
    }
}
