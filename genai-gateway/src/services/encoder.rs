//! Turns a staged upload into inline data for the model.

use crate::error::GenerateError;
use crate::models::EncodedPayload;
use crate::services::staging::StagedUpload;
use tokio::fs;

/// Read the whole staged file and base64-encode it with its media type.
pub async fn encode_upload(upload: &StagedUpload) -> Result<EncodedPayload, GenerateError> {
    let bytes = fs::read(upload.path())
        .await
        .map_err(|source| GenerateError::UnreadableFile {
            path: upload.path().to_path_buf(),
            source,
        })?;

    Ok(EncodedPayload::from_bytes(&bytes, upload.media_type()))
}
