mod common;

use common::{TestApp, body_json};
use genai_gateway::models::ModelRequest;
use genai_gateway::services::providers::mock::MockModelProvider;
use serde_json::json;

const TEXT_ERROR: &str = "An error occurred while generating text.";

#[tokio::test]
async fn generate_text_relays_model_output() {
    let app = TestApp::spawn(MockModelProvider::replying("Hello!")).await;

    let response = app
        .post_json("/generate-text", json!({ "prompt": "Say hello" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(body_json(response).await, json!({ "output": "Hello!" }));
    assert_eq!(
        app.provider.requests(),
        vec![ModelRequest::new("Say hello", None)]
    );
}

#[tokio::test]
async fn repeated_prompts_are_not_cached() {
    let app = TestApp::spawn(MockModelProvider::replying("Hello!")).await;

    for _ in 0..2 {
        let response = app
            .post_json("/generate-text", json!({ "prompt": "Say hello" }))
            .await;
        assert_eq!(response.status().as_u16(), 200);
    }

    assert_eq!(app.provider.call_count(), 2);
}

#[tokio::test]
async fn missing_prompt_fails_without_model_call() {
    let app = TestApp::spawn(MockModelProvider::replying("Hello!")).await;

    let response = app.post_json("/generate-text", json!({})).await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(body_json(response).await, json!({ "error": TEXT_ERROR }));
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn malformed_body_gets_the_same_failure_shape() {
    let app = TestApp::spawn(MockModelProvider::replying("Hello!")).await;

    let response = app
        .client
        .post(app.url("/generate-text"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(body_json(response).await, json!({ "error": TEXT_ERROR }));
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn model_failure_returns_fixed_message() {
    let app = TestApp::spawn(MockModelProvider::failing()).await;

    let response = app
        .post_json("/generate-text", json!({ "prompt": "Say hello" }))
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": TEXT_ERROR }));
    assert!(!body.to_string().contains("Mock provider failure"));
    assert_eq!(app.provider.call_count(), 1);
}
