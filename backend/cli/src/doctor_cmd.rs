//! CLI Doctor Command
//!
//! Validates the effective configuration and the token file without
//! starting the server.

use anyhow::Result;
use jiaofu_config::{validate, GatewayConfig};
use jiaofu_security::TokenStore;

/// Executes the full diagnosis. Returns `false` when a check failed.
pub async fn run(config: &GatewayConfig) -> Result<bool> {
    println!("\nRunning Jiaofu doctor...\n");

    let config_ok = check_config(config);
    let store_ok = check_token_store(config).await;

    println!();
    if config_ok && store_ok {
        println!("All checks passed.");
    } else {
        println!("Some checks failed. Fix the errors above.");
    }
    Ok(config_ok && store_ok)
}

fn check_config(config: &GatewayConfig) -> bool {
    println!("Configuration:");
    let report = validate(config);
    for error in &report.errors {
        println!("  [error] {}: {}", error.path, error.message);
    }
    for warning in &report.warnings {
        println!("  [warn]  {}: {}", warning.path, warning.message);
    }
    if report.errors.is_empty() && report.warnings.is_empty() {
        println!("  [ok]    all settings present");
    }
    report.is_valid()
}

async fn check_token_store(config: &GatewayConfig) -> bool {
    println!("Token store:");
    match TokenStore::load(&config.token_file).await {
        Ok(store) => {
            println!("  [ok]    {} tokens in {}", store.len().await, store.path().display());
            true
        }
        Err(e) => {
            println!("  [error] {e}");
            false
        }
    }
}
