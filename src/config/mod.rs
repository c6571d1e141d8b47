use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::og::{
    ResolverConfig, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_REDIRECTS,
    DEFAULT_USER_AGENT,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Anything other than `APP_ENV=production`.
    pub is_dev: bool,
    pub allowed_origins: Vec<String>,
    pub og_fetch_timeout: Duration,
    pub og_user_agent: String,
    pub og_max_body_bytes: usize,
    pub og_max_redirects: usize,
}

impl Config {
    /// Read configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let og_fetch_timeout_secs: u64 =
            parse_var("OG_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT.as_secs())?;
        if og_fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "OG_FETCH_TIMEOUT_SECS",
                value: "0".into(),
            });
        }

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: parse_var("SERVER_PORT", 8080)?,
            is_dev: env::var("APP_ENV").as_deref() != Ok("production"),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            og_fetch_timeout: Duration::from_secs(og_fetch_timeout_secs),
            og_user_agent: env::var("OG_USER_AGENT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            og_max_body_bytes: parse_var("OG_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            og_max_redirects: parse_var("OG_MAX_REDIRECTS", DEFAULT_MAX_REDIRECTS)?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            timeout: self.og_fetch_timeout,
            user_agent: self.og_user_agent.clone(),
            max_body_bytes: self.og_max_body_bytes,
            max_redirects: self.og_max_redirects,
        }
    }
}

/// Unset means `default`; set but unparsable is an error.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
