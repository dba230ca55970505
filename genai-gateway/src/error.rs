//! Failure taxonomy of the generation pipeline and its HTTP translation.

use crate::dtos::ErrorResponse;
use crate::models::Modality;
use crate::services::providers::ProviderError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// A required prompt or file part was not supplied.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// The request body could not be parsed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The upload could not be written to the scratch directory.
    #[error("Failed to stage upload: {0}")]
    Staging(#[source] std::io::Error),

    /// The staged file vanished or could not be read back.
    #[error("Unreadable file {path}: {source}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external model call failed.
    #[error("Model invocation failed: {0}")]
    ModelInvocation(#[from] ProviderError),
}

/// A pipeline error bound to the route that produced it.
///
/// The client always receives the route's fixed message with status 500;
/// the cause is only logged.
#[derive(Debug)]
pub struct GenerationFailure {
    pub modality: Modality,
    pub error: GenerateError,
}

impl GenerationFailure {
    pub fn new(modality: Modality, error: GenerateError) -> Self {
        Self { modality, error }
    }
}

impl IntoResponse for GenerationFailure {
    fn into_response(self) -> Response {
        tracing::error!(
            modality = %self.modality,
            error = %self.error,
            "Generation request failed"
        );

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.modality.error_message().to_string(),
            }),
        )
            .into_response()
    }
}
