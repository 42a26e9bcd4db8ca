use clap::Args;
use jiaofu_config::defaults::{DEFAULT_API_BASE, DEFAULT_BIND, DEFAULT_PORT, DEFAULT_TOKEN_FILE};
use jiaofu_config::{GatewayConfig, VendorSettings};
use std::path::PathBuf;

/// Server flags. Every value can also come from the environment or `.env`.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Port to bind the HTTP server to
    #[arg(short, long, env = "JIAOFU_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind the HTTP server to
    #[arg(long, env = "JIAOFU_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Verbose logging
    #[arg(long)]
    pub debug: bool,

    /// Token store file
    #[arg(short, long, env = "JIAOFU_CONFIG", default_value = DEFAULT_TOKEN_FILE)]
    pub config: PathBuf,

    /// Ark API key
    #[arg(short = 'k', long, env = "ARK_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Ark API base URL
    #[arg(short = 'b', long, env = "ARK_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Ark model name
    #[arg(short, long, env = "ARK_MODEL", default_value = "")]
    pub model: String,

    /// Admin key for user management
    #[arg(short, long, env = "ADMIN_KEY", default_value = "", hide_env_values = true)]
    pub admin_key: String,

    /// Requests per token per minute on /llm/* (0 disables)
    #[arg(long, env = "JIAOFU_RATE_LIMIT", default_value_t = 0)]
    pub rate_limit: u32,

    /// Mount the unauthenticated /s/ocr route
    #[arg(long, env = "JIAOFU_PUBLIC_OCR")]
    pub enable_public_ocr: bool,

    /// Write daily-rotated NDJSON logs to this directory
    #[arg(long, env = "JIAOFU_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Emit console logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl From<ServeArgs> for GatewayConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            bind_address: args.bind,
            port: args.port,
            debug: args.debug,
            token_file: args.config,
            vendor: VendorSettings {
                api_key: args.api_key,
                api_base: args.api_base,
                model: args.model,
            },
            admin_key: args.admin_key,
            rate_limit_per_minute: args.rate_limit,
            enable_public_ocr: args.enable_public_ocr,
            log_dir: args.log_dir,
            json_logs: args.json_logs,
        }
    }
}
