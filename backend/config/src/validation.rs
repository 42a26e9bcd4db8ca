//! Config validation: startup checks with user-friendly messages.

use crate::schema::GatewayConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
///
/// Missing vendor credentials are warnings only: they surface as a
/// configuration error on the first OCR call, not at startup.
pub fn validate(config: &GatewayConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_vendor(config, &mut report);
    validate_admin(config, &mut report);
    report
}

fn validate_server(config: &GatewayConfig, report: &mut ValidationReport) {
    if config.bind_address.trim().is_empty() {
        report.error("bind_address", "Bind address cannot be empty");
    }
    if config.port == 0 {
        report.error("port", "Port must be between 1 and 65535");
    }
    if config.token_file.as_os_str().is_empty() {
        report.error("token_file", "Token file path cannot be empty");
    }
    if config.enable_public_ocr {
        report.warn("enable_public_ocr", "Unauthenticated /s/ocr route is enabled");
    }
}

fn validate_vendor(config: &GatewayConfig, report: &mut ValidationReport) {
    if config.vendor.api_key.trim().is_empty() {
        report.warn("vendor.api_key", "No API key configured; OCR calls will fail");
    }
    if config.vendor.model.trim().is_empty() {
        report.warn("vendor.model", "No model configured; OCR calls will fail");
    }
}

fn validate_admin(config: &GatewayConfig, report: &mut ValidationReport) {
    if !config.admin_enabled() {
        report.warn("admin_key", "No admin key configured; user management is disabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::VendorSettings;

    fn complete_config() -> GatewayConfig {
        GatewayConfig {
            vendor: VendorSettings {
                api_key: "ak-123".into(),
                api_base: String::new(),
                model: "doubao-vision".into(),
            },
            admin_key: "secret".into(),
            ..Default::default()
        }
    }

    #[test]
    fn complete_config_is_clean() {
        let report = validate(&complete_config());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn missing_credentials_only_warn() {
        let report = validate(&GatewayConfig::default());
        assert!(report.is_valid());
        let paths: Vec<_> = report.warnings.iter().map(|w| w.path.as_str()).collect();
        assert!(paths.contains(&"vendor.api_key"));
        assert!(paths.contains(&"vendor.model"));
        assert!(paths.contains(&"admin_key"));
    }

    #[test]
    fn port_zero_is_fatal() {
        let config = GatewayConfig {
            port: 0,
            ..complete_config()
        };
        let report = validate(&config);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "port");
    }
}
