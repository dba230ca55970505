#![allow(dead_code)]

use genai_gateway::config::{GatewayConfig, GeminiSettings, UploadConfig};
use genai_gateway::services::providers::mock::MockModelProvider;
use genai_gateway::startup::Application;
use reqwest::multipart::{Form, Part};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub provider: Arc<MockModelProvider>,
    pub scratch: TempDir,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the gateway on a random port, backed by `provider` and a fresh
    /// scratch directory the provider watches.
    pub async fn spawn(provider: MockModelProvider) -> Self {
        Self::spawn_with(provider, |_| {}).await
    }

    /// Like `spawn`, with a hook to adjust the configuration first.
    pub async fn spawn_with(
        provider: MockModelProvider,
        configure: impl FnOnce(&mut GatewayConfig),
    ) -> Self {
        let scratch = tempfile::tempdir().expect("Failed to create scratch dir");
        let provider = Arc::new(provider.watching_dir(scratch.path()));

        let mut config = test_config(&scratch);
        configure(&mut config);
        let app = Application::build_with_provider(config, provider.clone())
            .await
            .expect("Failed to build test application");

        Self::start(app, provider, scratch).await
    }

    /// Spawn the gateway backed by the real Gemini client, as configured.
    /// Returns the base address.
    pub async fn spawn_gemini(config: GatewayConfig) -> String {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });
        wait_until_healthy(&address).await;

        address
    }

    async fn start(app: Application, provider: Arc<MockModelProvider>, scratch: TempDir) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });
        wait_until_healthy(&address).await;

        TestApp {
            address,
            port,
            provider,
            scratch,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_form(&self, path: &str, form: Form) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Number of files currently in the scratch directory.
    pub fn scratch_entries(&self) -> usize {
        scratch_entries(&self.scratch)
    }
}

pub fn test_config(scratch: &TempDir) -> GatewayConfig {
    GatewayConfig {
        common: CoreConfig { port: 0 },
        gemini: GeminiSettings::with_api_key("test-api-key"),
        uploads: UploadConfig::new(scratch.path()),
    }
}

pub fn scratch_entries(scratch: &TempDir) -> usize {
    std::fs::read_dir(scratch.path())
        .expect("Failed to read scratch dir")
        .count()
}

pub fn file_part(bytes: &[u8], file_name: &str, mime: &str) -> Part {
    Part::bytes(bytes.to_vec())
        .file_name(file_name.to_string())
        .mime_str(mime)
        .expect("Invalid mime type")
}

pub async fn body_json(response: reqwest::Response) -> serde_json::Value {
    response.json().await.expect("Failed to parse JSON")
}

async fn wait_until_healthy(address: &str) {
    let client = reqwest::Client::new();
    let health_url = format!("{}/health", address);
    for _ in 0..50 {
        if client.get(&health_url).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
    }
}

