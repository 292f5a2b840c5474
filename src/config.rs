// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! # Runtime Configuration
//!
//! Configuration is read from the environment exactly once at startup. A
//! missing or undecodable signing secret is fatal: the process refuses to
//! start rather than run with an undefined signing key.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET_KEY` | Base64 signing secret for bearer tokens | Required |
//! | `JWT_EXPIRATION_MILLIS` | Issued token lifetime in milliseconds | `3600000` |
//! | `JWT_CLOCK_SKEW_SECONDS` | Expiry grace period for clock drift | `60` |
//! | `AUTH_EXEMPT_PATHS` | Comma-separated path prefixes served without auth | (none) |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;

use chrono::Duration;

use crate::auth::validator::DEFAULT_CLOCK_SKEW_SECONDS;
use crate::auth::{SecretError, SigningSecret};

/// Environment variable holding the base64 token signing secret.
pub const JWT_SECRET_KEY_ENV: &str = "JWT_SECRET_KEY";

/// Environment variable for the issued token lifetime, in milliseconds.
pub const JWT_EXPIRATION_MILLIS_ENV: &str = "JWT_EXPIRATION_MILLIS";

/// Environment variable for the expiry clock-skew allowance, in seconds.
pub const JWT_CLOCK_SKEW_SECONDS_ENV: &str = "JWT_CLOCK_SKEW_SECONDS";

/// Environment variable listing path prefixes exempt from authentication.
pub const AUTH_EXEMPT_PATHS_ENV: &str = "AUTH_EXEMPT_PATHS";

/// Environment variable for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Fallback `RUST_LOG` filter when none is set.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Default issued token lifetime: one hour.
pub const DEFAULT_EXPIRATION_MILLIS: i64 = 3_600_000;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Why the configuration was rejected. Every variant is fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET_KEY is not set; refusing to start without a signing secret")]
    MissingSecret,

    #[error("JWT_SECRET_KEY is unusable: {0}")]
    InvalidSecret(#[from] SecretError),

    #[error("{name} is not a valid number: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("JWT_EXPIRATION_MILLIS must be positive, got {0}")]
    NonPositiveLifetime(i64),

    #[error("JWT_CLOCK_SKEW_SECONDS must not be negative, got {0}")]
    NegativeSkew(i64),

    #[error("HOST/PORT do not form a bindable address: {0:?}")]
    InvalidBindAddress(String),
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub secret: SigningSecret,
    pub token_lifetime: Duration,
    pub clock_skew: Duration,
    pub exempt_paths: Vec<String>,
    pub addr: SocketAddr,
}

impl Config {
    /// Read and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), with the variable lookup injected
    /// so tests never touch global process state.
    pub fn load(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret_value = get(JWT_SECRET_KEY_ENV).ok_or(ConfigError::MissingSecret)?;
        let secret = SigningSecret::from_base64(&secret_value)?;

        let lifetime_millis = parse_var(
            JWT_EXPIRATION_MILLIS_ENV,
            get(JWT_EXPIRATION_MILLIS_ENV),
            DEFAULT_EXPIRATION_MILLIS,
        )?;
        if lifetime_millis <= 0 {
            return Err(ConfigError::NonPositiveLifetime(lifetime_millis));
        }

        let skew_seconds = parse_var(
            JWT_CLOCK_SKEW_SECONDS_ENV,
            get(JWT_CLOCK_SKEW_SECONDS_ENV),
            DEFAULT_CLOCK_SKEW_SECONDS,
        )?;
        if skew_seconds < 0 {
            return Err(ConfigError::NegativeSkew(skew_seconds));
        }

        let exempt_paths = get(AUTH_EXEMPT_PATHS_ENV)
            .map(|raw| {
                raw.split(',')
                    .map(|prefix| prefix.trim().to_string())
                    .filter(|prefix| !prefix.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port: u16 = parse_var(PORT_ENV, get(PORT_ENV), DEFAULT_PORT)?;
        let addr = format!("{host}:{port}")
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(format!("{host}:{port}")))?;

        Ok(Self {
            secret,
            token_lifetime: Duration::milliseconds(lifetime_millis),
            clock_skew: Duration::seconds(skew_seconds),
            exempt_paths,
            addr,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}
