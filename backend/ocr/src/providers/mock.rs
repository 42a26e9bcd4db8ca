use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use jiaofu_core::{JiaofuError, OcrProvider, OcrRequest, OcrResponse};

enum Failure {
    Upstream(String),
    NoChoices,
}

/// A mock OCR provider that returns canned responses and counts calls.
pub struct MockProvider {
    name: String,
    fixed_response: Option<String>,
    fail_with: Option<Failure>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed_response: None,
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Make every call fail with an upstream error carrying `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(Failure::Upstream(message.into()));
        self
    }

    /// Make every call behave like a vendor reply with no choices.
    pub fn empty(mut self) -> Self {
        self.fail_with = Some(Failure::NoChoices);
        self
    }

    /// Number of `recognize` calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn recognize(&self, _req: &OcrRequest) -> Result<OcrResponse, JiaofuError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(Failure::Upstream(message)) => return Err(JiaofuError::Upstream(message.clone())),
            Some(Failure::NoChoices) => return Err(JiaofuError::EmptyResponse),
            None => {}
        }
        Ok(OcrResponse {
            text: self
                .fixed_response
                .clone()
                .unwrap_or_else(|| "Mock response".to_string()),
            provider: self.name.clone(),
            model: "mock".to_string(),
            latency_ms: 0,
        })
    }
}
