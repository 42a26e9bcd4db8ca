//! Structured logging for the Jiaofu gateway.
//!
//! Handles subscriber setup, optional NDJSON file rotation, and scrubbing of
//! credentials from free-form text before it is logged.

pub mod logger;
pub mod redact;

pub use logger::{LogOptions, init_logger};
pub use redact::redact_sensitive_data;
