use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::JiaofuError;

/// Trait for vision providers that turn an image reference into text.
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Provider name (e.g., "ark", "mock").
    fn name(&self) -> &str;

    /// Recognize the text visible in the referenced image.
    async fn recognize(&self, request: &OcrRequest) -> Result<OcrResponse, JiaofuError>;
}

/// Inbound OCR request body.
///
/// `image_data` is a URL or data URI the vendor can dereference; it is
/// passed through without local format or size checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrRequest {
    pub image_data: String,
}

/// Result of a single recognition call.
#[derive(Debug, Clone)]
pub struct OcrResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
}
