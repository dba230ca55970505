//! One handler per input modality.
//!
//! Every handler answers 200 `{ output }` or 500 `{ error }` with the
//! modality's fixed message; see [`GenerationFailure`].

use crate::dtos::{GenerateResponse, GenerateTextRequest};
use crate::error::{GenerateError, GenerationFailure};
use crate::models::Modality;
use crate::services::{StagedUpload, UploadForm, encode_upload, invoke};
use crate::startup::AppState;
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
};

type GenerateResult = Result<Json<GenerateResponse>, GenerationFailure>;

pub async fn generate_text(
    State(state): State<AppState>,
    body: Result<Json<GenerateTextRequest>, JsonRejection>,
) -> GenerateResult {
    let fail = |error| GenerationFailure::new(Modality::Text, error);

    let Json(body) = body.map_err(|e| fail(GenerateError::InvalidInput(e.body_text())))?;
    let prompt = non_blank(body.prompt)
        .ok_or_else(|| fail(GenerateError::MissingInput("prompt".to_string())))?;

    let output = invoke(state.provider.as_ref(), &prompt, None)
        .await
        .map_err(fail)?;

    Ok(Json(GenerateResponse { output }))
}

pub async fn generate_from_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> GenerateResult {
    generate_from_upload(&state, Modality::Image, multipart).await
}

pub async fn generate_from_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> GenerateResult {
    generate_from_upload(&state, Modality::Document, multipart).await
}

pub async fn generate_from_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> GenerateResult {
    generate_from_upload(&state, Modality::Audio, multipart).await
}

/// Stage, encode, invoke, then release the staged file on every path.
async fn generate_from_upload(
    state: &AppState,
    modality: Modality,
    multipart: Result<Multipart, MultipartRejection>,
) -> GenerateResult {
    let fail = |error| GenerationFailure::new(modality, error);

    let Some(file_field) = modality.file_field() else {
        return Err(fail(GenerateError::InvalidInput(format!(
            "{} requests take no upload",
            modality
        ))));
    };

    let multipart = multipart.map_err(|e| fail(GenerateError::InvalidInput(e.body_text())))?;
    let form = UploadForm::read(multipart, &state.stager, file_field)
        .await
        .map_err(fail)?;

    let Some(upload) = form.upload else {
        return Err(fail(GenerateError::MissingInput(format!(
            "'{}' file part",
            file_field
        ))));
    };

    let result = encode_and_invoke(state, modality, form.prompt, &upload).await;
    upload.release().await;

    let output = result.map_err(fail)?;
    Ok(Json(GenerateResponse { output }))
}

async fn encode_and_invoke(
    state: &AppState,
    modality: Modality,
    prompt: Option<String>,
    upload: &StagedUpload,
) -> Result<String, GenerateError> {
    let prompt = non_blank(prompt)
        .or_else(|| modality.default_prompt().map(str::to_string))
        .ok_or_else(|| GenerateError::MissingInput("prompt".to_string()))?;

    let payload = encode_upload(upload).await?;

    tracing::info!(
        modality = %modality,
        media_type = %payload.media_type(),
        "Forwarding upload to model"
    );

    invoke(state.provider.as_ref(), &prompt, Some(payload)).await
}

/// Blank prompts count as absent.
fn non_blank(prompt: Option<String>) -> Option<String> {
    prompt.filter(|p| !p.trim().is_empty())
}
