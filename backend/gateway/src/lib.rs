//! Jiaofu Gateway HTTP Server
//!
//! Token-gated OCR endpoint, cookie-gated user management, and the login
//! flow for the admin page.

pub mod admin_ui;
pub mod auth;
pub mod error;
pub mod extract;
pub mod health_api;
pub mod ocr_api;
pub mod rate_limit;
pub mod server;
pub mod users_api;

pub use error::ApiError;
pub use rate_limit::RateLimiter;
pub use server::{GatewayState, build_router, shutdown_signal, start_server};
