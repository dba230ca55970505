//! The single outbound call to the model.

use crate::error::GenerateError;
use crate::models::{EncodedPayload, ModelRequest};
use crate::services::providers::ModelProvider;

/// Send `prompt` (and `payload`, if any) to the model and return its text.
///
/// The reply is passed through untouched. Provider failures surface as
/// [`GenerateError::ModelInvocation`]; nothing is retried.
pub async fn invoke(
    provider: &dyn ModelProvider,
    prompt: &str,
    payload: Option<EncodedPayload>,
) -> Result<String, GenerateError> {
    let request = ModelRequest::new(prompt, payload);

    let response = provider.generate(&request).await?;

    tracing::info!(
        input_tokens = ?response.input_tokens,
        output_tokens = ?response.output_tokens,
        finish_reason = ?response.finish_reason,
        output_len = response.text.len(),
        "Model invocation completed"
    );

    Ok(response.text)
}
