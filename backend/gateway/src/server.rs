//! Main HTTP Gateway Server.
//!
//! Router assembly, CORS, and the listener loop.

use anyhow::{Context, Result};
use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{HeaderName, Method, StatusCode, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use jiaofu_core::OcrProvider;
use jiaofu_security::{AdminKey, TokenStore};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::rate_limit::RateLimiter;
use crate::{admin_ui, auth, health_api, ocr_api, users_api};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub tokens: Arc<TokenStore>,
    pub provider: Arc<dyn OcrProvider>,
    pub admin_key: AdminKey,
    pub rate_limiter: Option<RateLimiter>,
    pub public_ocr: bool,
}

impl GatewayState {
    pub fn new(tokens: Arc<TokenStore>, provider: Arc<dyn OcrProvider>, admin_key: AdminKey) -> Self {
        Self {
            tokens,
            provider,
            admin_key,
            rate_limiter: None,
            public_ocr: false,
        }
    }

    pub fn with_rate_limiter(mut self, limiter: Option<RateLimiter>) -> Self {
        self.rate_limiter = limiter;
        self
    }

    pub fn with_public_ocr(mut self, enabled: bool) -> Self {
        self.public_ocr = enabled;
        self
    }
}

/// Build the router with every route, auth gate, and CORS.
pub fn build_router(state: GatewayState) -> Router {
    let llm_routes = Router::new()
        .route("/llm/ocr", post(ocr_api::recognize))
        .route("/llm/test", get(ocr_api::probe))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_token));

    let admin_routes = Router::new()
        .route("/", get(admin_ui::users_page))
        .route("/users", get(users_api::list_users))
        .route("/users/add", post(users_api::add_user))
        .route("/users/remove", post(users_api::remove_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    let mut app = Router::new()
        .route("/auth", get(admin_ui::login_page).post(admin_ui::login))
        .route("/api/health", get(health_api::get_health))
        .merge(llm_routes)
        .merge(admin_routes);

    if state.public_ocr {
        app = app.route("/s/ocr", post(ocr_api::recognize_public));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(middleware::from_fn(options_no_content))
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            HeaderName::from_static("x-csrf-token"),
            header::AUTHORIZATION,
            HeaderName::from_static("authentication"),
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([header::CONTENT_LENGTH, header::AUTHORIZATION])
}

/// Every `OPTIONS` request ends as an empty 204 carrying the CORS headers,
/// whether or not it was a well-formed preflight.
async fn options_no_content(req: Request, next: Next) -> Response {
    if req.method() != Method::OPTIONS {
        return next.run(req).await;
    }
    let (mut parts, _) = next.run(req).await.into_parts();
    parts.status = StatusCode::NO_CONTENT;
    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::empty())
}

/// Starts the HTTP server and serves until `shutdown` resolves.
#[instrument(skip(state, shutdown))]
pub async fn start_server<F>(addr: &str, state: GatewayState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Gateway HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    info!("Gateway HTTP server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
