//! Gateway Authentication
//!
//! Two gates with different failure presentations: machine clients on
//! `/llm/*` get a JSON rejection, the human admin is redirected to the
//! login page.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use jiaofu_config::mask_secret;
use jiaofu_core::JiaofuError;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::server::GatewayState;

/// Cookie carrying the admin key.
pub const ADMIN_COOKIE: &str = "admin_key";

/// The token that passed the bearer gate, available to handlers.
#[derive(Debug, Clone)]
pub struct AuthorizedToken(pub String);

/// Read the `Authorization` header and percent-decode it.
///
/// Clients send `encodeURIComponent(token)`, older ones the raw UTF-8 name.
/// A literal `+` is kept as-is. Returns `None` when the header is absent or
/// the decoded bytes are not UTF-8.
pub fn decode_authorization(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?;
    String::from_utf8(urlencoding::decode_binary(raw.as_bytes()).into_owned()).ok()
}

/// Bearer-token gate for `/llm/*`.
pub async fn require_token(
    State(state): State<GatewayState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = decode_authorization(req.headers()) else {
        warn!("Missing or undecodable Authorization header");
        return Err(JiaofuError::Unauthorized.into());
    };

    if !state.tokens.is_authorized(&token).await {
        warn!(token = %mask_secret(&token), "Rejected unknown token");
        return Err(JiaofuError::Unauthorized.into());
    }

    if let Some(limiter) = &state.rate_limiter {
        if !limiter.check_limit(&token).await {
            return Err(ApiError::RateLimited);
        }
    }

    debug!(token = %mask_secret(&token), "Token authorized");
    req.extensions_mut().insert(AuthorizedToken(token));
    Ok(next.run(req).await)
}

/// Admin-cookie gate for the user-management surface.
pub async fn require_admin(
    State(state): State<GatewayState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let candidate = jar.get(ADMIN_COOKIE).map(|c| c.value());
    if state.admin_key.verify(candidate) {
        next.run(req).await
    } else {
        debug!(path = %req.uri().path(), "Admin cookie missing or invalid");
        found("/auth")
    }
}

/// `302 Found` redirect.
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
