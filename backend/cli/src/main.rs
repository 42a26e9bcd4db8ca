mod config;
mod doctor_cmd;
mod status_cmd;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use jiaofu_config::defaults::default_log_level;
use jiaofu_config::{redact, validate, GatewayConfig};
use jiaofu_gateway::{shutdown_signal, start_server, GatewayState, RateLimiter};
use jiaofu_logging::{init_logger, LogOptions};
use jiaofu_ocr::ArkProvider;
use jiaofu_security::{AdminKey, TokenStore};

use config::ServeArgs;

#[derive(Parser)]
#[command(name = "jiaofu")]
#[command(about = "Jiaofu: token-gated OCR gateway")]
#[command(version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Query a running gateway's health endpoint
    Status {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(short, long, env = "JIAOFU_PORT", default_value_t = jiaofu_config::defaults::DEFAULT_PORT)]
        port: u16,
    },
    /// Validate configuration and the token file, then exit
    Doctor {
        #[command(flatten)]
        serve: ServeArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Status { host, port }) => status_cmd::run(&host, port).await,
        Some(Commands::Doctor { serve }) => {
            if !doctor_cmd::run(&GatewayConfig::from(serve)).await? {
                std::process::exit(1);
            }
            Ok(())
        }
        None => run_server(cli.serve.into()).await,
    }
}

async fn run_server(config: GatewayConfig) -> Result<()> {
    init_logger(&LogOptions {
        level: default_log_level(config.debug).to_string(),
        json: config.json_logs,
        log_dir: config.log_dir.clone(),
    });

    let report = validate(&config);
    for warning in &report.warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        bail!("invalid configuration ({} errors)", report.errors.len());
    }

    let snapshot = redact(&serde_json::to_value(&config)?);
    info!(config = %snapshot, "Starting Jiaofu gateway");

    let tokens = TokenStore::load(&config.token_file)
        .await
        .context("Failed to load token store")?;

    let provider = ArkProvider::new(config.vendor.clone());
    let limiter = RateLimiter::per_minute(config.rate_limit_per_minute);
    if let Some(limiter) = &limiter {
        limiter.spawn_cleanup_loop();
        info!(per_minute = config.rate_limit_per_minute, "Rate limiting enabled");
    }

    let state = GatewayState::new(
        Arc::new(tokens),
        Arc::new(provider),
        AdminKey::new(config.admin_key.clone()),
    )
    .with_rate_limiter(limiter)
    .with_public_ocr(config.enable_public_ocr);

    start_server(&config.listen_addr(), state, shutdown_signal()).await
}
