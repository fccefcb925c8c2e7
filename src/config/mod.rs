//! Configuration module entry point
//!
//! Loads application configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{
    Config, HealthConfig, LoggingConfig, PerformanceConfig, RoutesConfig, ServerConfig,
    UpstreamConfig,
};

/// Environment variable holding the bearer credential; takes precedence over `upstream.bearer_token`
pub const BEARER_ENV_VAR: &str = "TWITTER_BEARER";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("PROXY").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8787)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("upstream.api_base", "https://api.twitter.com")?
            .set_default("upstream.timeout_secs", 30)?
            .set_override_option("upstream.bearer_token", std::env::var(BEARER_ENV_VAR).ok())?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the proxy cannot serve with
    fn validate(&self) -> Result<(), config::ConfigError> {
        match self.upstream.bearer_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => {}
            _ => {
                return Err(config::ConfigError::Message(format!(
                    "missing upstream bearer token (set upstream.bearer_token or {BEARER_ENV_VAR})"
                )))
            }
        }

        url::Url::parse(&self.upstream.api_base).map_err(|e| {
            config::ConfigError::Message(format!(
                "invalid upstream.api_base '{}': {e}",
                self.upstream.api_base
            ))
        })?;

        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Bearer credential; empty only if `validate` was skipped
    pub fn bearer_token(&self) -> &str {
        self.upstream.bearer_token.as_deref().map_or("", str::trim)
    }
}
