//! `jiaofu-config`: gateway runtime configuration.
//!
//! Provides:
//! - Typed config (`GatewayConfig`) assembled by the binary from flags and env
//! - Default values shared by the CLI and tests
//! - Validation with errors (fatal) and warnings (logged)
//! - Secret redaction for logging the effective config

pub mod defaults;
pub mod redact;
pub mod schema;
pub mod validation;

pub use redact::{mask_secret, redact};
pub use schema::{GatewayConfig, VendorSettings};
pub use validation::{validate, ConfigValidationError, ValidationReport};
