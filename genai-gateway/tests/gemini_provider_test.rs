//! The Gemini client against a local mock of the REST API.

mod common;

use common::{TestApp, test_config};
use genai_gateway::models::{EncodedPayload, ModelRequest};
use genai_gateway::services::providers::gemini::{GeminiConfig, GeminiProvider};
use genai_gateway::services::providers::{ModelProvider, ProviderError};
use secrecy::Secret;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn provider_for(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(GeminiConfig {
        api_key: Secret::new("test-api-key".to_string()),
        model: "gemini-2.5-flash".to_string(),
        api_base: format!("{}/v1beta", server.uri()),
        timeout: Duration::from_secs(5),
    })
    .expect("Failed to build provider")
}

fn reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 4, "candidatesTokenCount": 2 }
    })
}

#[tokio::test]
async fn sends_prompt_and_inline_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-api-key"))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": "What is this?" },
                    { "inlineData": { "mimeType": "image/png", "data": "cG5n" } }
                ]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("A cat.")))
        .expect(1)
        .mount(&server)
        .await;

    let request = ModelRequest::new(
        "What is this?",
        Some(EncodedPayload::from_bytes(b"png", "image/png")),
    );
    let response = provider_for(&server).generate(&request).await.unwrap();

    assert_eq!(response.text, "A cat.");
    assert_eq!(response.input_tokens, Some(4));
    assert_eq!(response.output_tokens, Some(2));
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate(&ModelRequest::new("hi", None))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::RateLimited));
}

#[tokio::test]
async fn api_errors_carry_upstream_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error": { "message": "API key not valid" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate(&ModelRequest::new("hi", None))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::ApiError(ref msg) if msg.contains("API key not valid")));
}

#[tokio::test]
async fn unreachable_api_is_a_network_error() {
    let provider = GeminiProvider::new(GeminiConfig {
        api_key: Secret::new("test-api-key".to_string()),
        model: "gemini-2.5-flash".to_string(),
        api_base: "http://127.0.0.1:9/v1beta".to_string(),
        timeout: Duration::from_secs(2),
    })
    .unwrap();

    let err = provider
        .generate(&ModelRequest::new("hi", None))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NetworkError(_)));
}

#[tokio::test]
async fn gateway_relays_gemini_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "Say hello" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("Hello!")))
        .expect(1)
        .mount(&server)
        .await;

    let scratch = tempfile::tempdir().unwrap();
    let mut config = test_config(&scratch);
    config.gemini.api_base = format!("{}/v1beta", server.uri());
    let address = TestApp::spawn_gemini(config).await;

    let response = reqwest::Client::new()
        .post(format!("{}/generate-text", address))
        .json(&json!({ "prompt": "Say hello" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "output": "Hello!" }));
}

#[tokio::test]
async fn gateway_hides_blocked_reply_behind_fixed_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let scratch = tempfile::tempdir().unwrap();
    let mut config = test_config(&scratch);
    config.gemini.api_base = format!("{}/v1beta", server.uri());
    let address = TestApp::spawn_gemini(config).await;

    let form = reqwest::multipart::Form::new().part(
        "audio",
        common::file_part(b"RIFFfake", "clip.wav", "audio/wav"),
    );
    let response = reqwest::Client::new()
        .post(format!("{}/generate-from-audio", address))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "error": "An error occurred while generating text from audio." })
    );
    assert_eq!(common::scratch_entries(&scratch), 0);
}
