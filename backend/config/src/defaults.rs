//! Default values applied when a flag or env var is absent.

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind address.
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Token store file, relative to the working directory.
pub const DEFAULT_TOKEN_FILE: &str = "config.json";

/// Chat-completion base URL used when none is configured.
pub const DEFAULT_API_BASE: &str = "https://ark.cn-beijing.volces.com/api/v3/";

/// Max-age of the admin cookie, in seconds.
pub const ADMIN_COOKIE_MAX_AGE_SECS: i64 = 3600;

/// Default log level, raised to `debug` by `--debug`.
pub fn default_log_level(debug: bool) -> &'static str {
    if debug { "debug" } else { "info" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_raises_level() {
        assert_eq!(default_log_level(true), "debug");
        assert_eq!(default_log_level(false), "info");
    }
}
