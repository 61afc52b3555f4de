/*
 * Responsibility
 * - Read environment variables once at startup (ST2AUTH_URL, PORT, header names, timeouts)
 * - Fail startup only on values that cannot be used at all (invalid header names)
 */
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use axum::http::HeaderName;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_IDENTITY_HEADER: &str = "REMOTE_USER";
pub const DEFAULT_CLIENT_ADDR_HEADER: &str = "REMOTE_ADDR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Names of the headers the reverse proxy uses to forward request context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedHeaders {
    pub identity: HeaderName,
    pub client_addr: HeaderName,
}

impl Default for ForwardedHeaders {
    fn default() -> Self {
        Self {
            identity: HeaderName::from_static("remote_user"),
            client_addr: HeaderName::from_static("remote_addr"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Full URL of the st2 auth endpoint. Deliberately unvalidated.
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    pub upstream_connect_timeout: Duration,

    pub request_timeout: Duration,
    pub forwarded_headers: ForwardedHeaders,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = lookup("PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let upstream_url = lookup("ST2AUTH_URL").unwrap_or_default();

        let upstream_timeout = seconds(&lookup, "UPSTREAM_TIMEOUT_SECONDS", 5);
        let upstream_connect_timeout = seconds(&lookup, "UPSTREAM_CONNECT_TIMEOUT_SECONDS", 2);
        let request_timeout = seconds(&lookup, "REQUEST_TIMEOUT_SECONDS", 30);

        let identity = header_name(&lookup, "IDENTITY_HEADER", DEFAULT_IDENTITY_HEADER)?;
        let client_addr = header_name(&lookup, "CLIENT_ADDR_HEADER", DEFAULT_CLIENT_ADDR_HEADER)?;

        Ok(Self {
            addr,
            app_env,
            upstream_url,
            upstream_timeout,
            upstream_connect_timeout,
            request_timeout,
            forwarded_headers: ForwardedHeaders {
                identity,
                client_addr,
            },
        })
    }
}

fn seconds<F>(lookup: &F, key: &str, default: u64) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    let secs = lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default);
    Duration::from_secs(secs)
}

fn header_name<F>(lookup: &F, key: &'static str, default: &str) -> Result<HeaderName, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string());

    HeaderName::from_bytes(raw.as_bytes()).map_err(|_| ConfigError::Invalid(key))
}
