//! Typed gateway configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::defaults::{DEFAULT_API_BASE, DEFAULT_BIND, DEFAULT_PORT, DEFAULT_TOKEN_FILE};

/// Vendor chat-completion credentials.
///
/// Empty strings are allowed here; the OCR provider rejects a missing key
/// or model at call time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorSettings {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl VendorSettings {
    /// Base URL with the vendor default substituted for an empty value.
    pub fn effective_api_base(&self) -> &str {
        if self.api_base.trim().is_empty() {
            DEFAULT_API_BASE
        } else {
            &self.api_base
        }
    }
}

/// Runtime configuration for the gateway process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Verbose logging
    pub debug: bool,
    /// Path of the JSON token store (`{"users": [...]}`)
    pub token_file: PathBuf,
    pub vendor: VendorSettings,
    /// Shared secret for the admin cookie; empty disables the admin surface
    pub admin_key: String,
    /// Requests per token per minute on `/llm/*`; 0 disables limiting
    pub rate_limit_per_minute: u32,
    /// Mount the unauthenticated `/s/ocr` route
    pub enable_public_ocr: bool,
    /// Directory for rotated NDJSON logs
    pub log_dir: Option<PathBuf>,
    pub json_logs: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            debug: false,
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            vendor: VendorSettings {
                api_base: DEFAULT_API_BASE.to_string(),
                ..Default::default()
            },
            admin_key: String::new(),
            rate_limit_per_minute: 0,
            enable_public_ocr: false,
            log_dir: None,
            json_logs: false,
        }
    }
}

impl GatewayConfig {
    /// `bind:port` string for the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn admin_enabled(&self) -> bool {
        !self.admin_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_base_falls_back_to_vendor_default() {
        let vendor = VendorSettings {
            api_key: "k".into(),
            api_base: "  ".into(),
            model: "m".into(),
        };
        assert_eq!(vendor.effective_api_base(), DEFAULT_API_BASE);
    }

    #[test]
    fn listen_addr_joins_bind_and_port() {
        let config = GatewayConfig {
            port: 9000,
            ..Default::default()
        };
        assert_eq!(config.listen_addr(), "0.0.0.0:9000");
        assert!(!config.admin_enabled());
    }
}
