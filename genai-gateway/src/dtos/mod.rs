//! Request and response bodies of the HTTP surface.

use serde::{Deserialize, Serialize};

/// Body of `POST /generate-text`.
#[derive(Debug, Deserialize)]
pub struct GenerateTextRequest {
    pub prompt: Option<String>,
}

/// Successful generation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateResponse {
    pub output: String,
}

/// Failed generation; `error` is a fixed per-route message.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
