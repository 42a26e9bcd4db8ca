//! Admin user-management API: the token allowlist.

use axum::{Json, extract::State};
use jiaofu_core::JiaofuError;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub uname: String,
}

impl UserRequest {
    fn name(&self) -> Result<&str, ApiError> {
        if self.uname.is_empty() {
            return Err(JiaofuError::Validation("uname is required".into()).into());
        }
        Ok(&self.uname)
    }
}

/// Handler for `GET /users`.
pub async fn list_users(State(state): State<GatewayState>) -> Json<Value> {
    Json(json!({ "users": state.tokens.list().await }))
}

/// Handler for `POST /users/add`.
pub async fn add_user(
    State(state): State<GatewayState>,
    JsonBody(request): JsonBody<UserRequest>,
) -> Result<Json<Value>, ApiError> {
    let name = request.name()?;
    state.tokens.add(name).await?;
    let count = state.tokens.len().await;
    info!(count, "User added");
    Ok(Json(json!({ "message": "User added successfully" })))
}

/// Handler for `POST /users/remove`.
pub async fn remove_user(
    State(state): State<GatewayState>,
    JsonBody(request): JsonBody<UserRequest>,
) -> Result<Json<Value>, ApiError> {
    let name = request.name()?;
    state.tokens.remove(name).await?;
    let count = state.tokens.len().await;
    info!(count, "User removed");
    Ok(Json(json!({ "message": "User removed successfully" })))
}
