//! JSON body extractor with gateway-style rejections.
//!
//! axum's `Json` rejects with 415/422 and a plain-text body; every malformed
//! body here is a 400 with `{"error": "Invalid request: .."}` instead.

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use jiaofu_core::JiaofuError;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(JiaofuError::Validation(rejection.body_text()).into()),
        }
    }
}
