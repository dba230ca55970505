//! Mock provider implementation for testing.

use super::{ModelProvider, ProviderError, ProviderResponse};
use crate::models::ModelRequest;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

/// How the mock answers each request.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always answer with the given text.
    Reply(String),
    /// Answer with the decoded payload bytes (lossy UTF-8), or the prompt
    /// when there is no payload.
    Echo,
    /// Fail every call as the upstream API would.
    Fail,
}

/// Mock model provider that records every request it receives.
pub struct MockModelProvider {
    behavior: MockBehavior,
    delay: Option<Duration>,
    watched_dir: Option<PathBuf>,
    requests: Mutex<Vec<ModelRequest>>,
    dir_entries: Mutex<Vec<usize>>,
}

impl MockModelProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            watched_dir: None,
            requests: Mutex::new(Vec::new()),
            dir_entries: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reply(text.into()))
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Fail)
    }

    /// Sleep before answering, to keep concurrent requests in flight together.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Count the entries of `dir` at the moment each call arrives.
    pub fn watching_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.watched_dir = Some(dir.into());
        self
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Snapshot of every request received, in arrival order.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Entry counts of the watched directory, one per call.
    pub fn observed_dir_entries(&self) -> Vec<usize> {
        self.dir_entries
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ModelProvider for MockModelProvider {
    async fn generate(&self, request: &ModelRequest) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if let Some(dir) = &self.watched_dir {
            let count = std::fs::read_dir(dir).map(|d| d.count()).unwrap_or_default();
            if let Ok(mut entries) = self.dir_entries.lock() {
                entries.push(count);
            }
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(ProviderResponse::text(text.clone())),
            MockBehavior::Echo => {
                let text = match request.payload() {
                    Some(payload) => {
                        let bytes = STANDARD.decode(payload.data()).map_err(|e| {
                            ProviderError::ApiError(format!("Invalid inline data: {}", e))
                        })?;
                        String::from_utf8_lossy(&bytes).into_owned()
                    }
                    None => request.prompt().to_string(),
                };
                Ok(ProviderResponse::text(text))
            }
            MockBehavior::Fail => Err(ProviderError::ApiError(
                "Mock provider failure".to_string(),
            )),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
