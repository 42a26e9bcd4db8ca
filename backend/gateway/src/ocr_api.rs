//! OCR endpoints.
//!
//! `POST /llm/ocr` behind the token gate, the optional public `POST /s/ocr`,
//! and the `GET /llm/test` token probe.

use axum::{Extension, Json, extract::State};
use jiaofu_config::mask_secret;
use jiaofu_core::{JiaofuError, OcrRequest};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::auth::AuthorizedToken;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::server::GatewayState;

#[derive(Debug, Serialize)]
pub struct OcrReply {
    pub text: String,
}

/// Handler for `POST /llm/ocr`.
pub async fn recognize(
    State(state): State<GatewayState>,
    Extension(AuthorizedToken(token)): Extension<AuthorizedToken>,
    JsonBody(request): JsonBody<OcrRequest>,
) -> Result<Json<OcrReply>, ApiError> {
    info!(token = %mask_secret(&token), "OCR request");
    run_ocr(&state, request).await
}

/// Handler for `POST /s/ocr`, mounted only when public OCR is enabled.
pub async fn recognize_public(
    State(state): State<GatewayState>,
    JsonBody(request): JsonBody<OcrRequest>,
) -> Result<Json<OcrReply>, ApiError> {
    info!("Public OCR request");
    run_ocr(&state, request).await
}

/// Handler for `GET /llm/test`. Reaching it means the token is valid.
pub async fn probe() -> Json<Value> {
    Json(json!({ "error": "ok" }))
}

// Dropping this future (client disconnect) drops the outbound vendor call.
async fn run_ocr(state: &GatewayState, request: OcrRequest) -> Result<Json<OcrReply>, ApiError> {
    if request.image_data.is_empty() {
        return Err(JiaofuError::Validation("image_data is required".into()).into());
    }

    let response = state
        .provider
        .recognize(&request)
        .await
        .map_err(ApiError::Ocr)?;

    info!(
        provider = %response.provider,
        model = %response.model,
        latency_ms = response.latency_ms,
        "OCR completed"
    );
    Ok(Json(OcrReply {
        text: response.text,
    }))
}
