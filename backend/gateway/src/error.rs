//! HTTP mapping of gateway errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jiaofu_core::JiaofuError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

const OCR_FAILURE: &str = "Internal server error occurred during OCR processing";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] JiaofuError),

    /// A recognition call failed; the detail is logged, not returned.
    #[error("OCR failed: {0}")]
    Ocr(JiaofuError),

    #[error("rate limit exceeded")]
    RateLimited,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(JiaofuError::Validation(_))
            | ApiError::Core(JiaofuError::AlreadyExists(_))
            | ApiError::Core(JiaofuError::NotFound(_)) => StatusCode::BAD_REQUEST,
            ApiError::Core(JiaofuError::Unauthorized) => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Core(JiaofuError::Validation(msg)) => {
                json!({ "error": format!("Invalid request: {msg}") })
            }
            ApiError::Core(JiaofuError::AlreadyExists(_)) => json!({ "error": "User already exists" }),
            ApiError::Core(JiaofuError::NotFound(_)) => json!({ "error": "User not found" }),
            // Clients read `text`, so the rejection is phrased there.
            ApiError::Core(JiaofuError::Unauthorized) => json!({ "text": "unauthorized" }),
            ApiError::Core(JiaofuError::Persistence(msg)) => {
                error!(error = %msg, "Token store write failed");
                json!({ "error": "Failed to save config" })
            }
            ApiError::Ocr(e) if e.is_upstream() => {
                warn!(error = %e, "Vendor call failed");
                json!({ "error": OCR_FAILURE })
            }
            ApiError::Ocr(e) => {
                error!(error = %e, "OCR error");
                json!({ "error": OCR_FAILURE })
            }
            ApiError::RateLimited => json!({ "error": "rate limit exceeded" }),
            ApiError::Core(e) => {
                error!(error = %e, "Request failed");
                json!({ "error": "Internal server error" })
            }
        };
        (status, Json(body)).into_response()
    }
}
