// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! immutable [`AppConfig`] loaded from the environment at startup. Nothing in
//! here is re-read or reassigned once the server is running.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | HMAC signing secret for bearer tokens | Required (non-empty) |
//! | `JWT_LIFETIME_SECS` | Token lifetime in seconds | `3600` |
//! | `AUTH_USERS` | Seed credentials, `user:password` pairs separated by commas | empty |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable holding the token lifetime in seconds.
pub const JWT_LIFETIME_ENV: &str = "JWT_LIFETIME_SECS";

/// Environment variable holding the seed credentials.
pub const AUTH_USERS_ENV: &str = "AUTH_USERS";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default token lifetime (1 hour).
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Startup configuration errors.
///
/// All of these are fatal: the process must not serve authenticated traffic
/// with a configuration that failed to load.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set")]
    MissingSecret,

    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("invalid JWT_LIFETIME_SECS value {0:?} (expected a whole number of seconds >= 1)")]
    InvalidLifetime(String),

    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),

    #[error("invalid AUTH_USERS entry {0:?} (expected user:password)")]
    InvalidUserEntry(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Read only the log format, so logging can start before the rest of
    /// the configuration is validated.
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Settings shared by the token issuer and the auth guard.
#[derive(Clone)]
pub struct AuthSettings {
    /// Raw signing secret bytes (validated non-empty by [`crate::auth::SigningSecret`])
    pub secret: Vec<u8>,
    /// Fixed token lifetime
    pub token_lifetime: Duration,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("secret", &"<redacted>")
            .field("token_lifetime", &self.token_lifetime)
            .finish()
    }
}

/// Full process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth: AuthSettings,
    /// Seed credentials for the in-memory credential store
    pub users: Vec<(String, String)>,
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(JWT_SECRET_ENV).ok_or(ConfigError::MissingSecret)?;
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let token_lifetime = match lookup(JWT_LIFETIME_ENV) {
            Some(raw) => parse_lifetime(&raw)?,
            None => DEFAULT_TOKEN_LIFETIME,
        };

        let users = match lookup(AUTH_USERS_ENV) {
            Some(raw) => parse_users(&raw)?,
            None => Vec::new(),
        };

        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let log_format = lookup(LOG_FORMAT_ENV)
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();

        Ok(Self {
            auth: AuthSettings {
                secret: secret.into_bytes(),
                token_lifetime,
            },
            users,
            host,
            port,
            log_format,
        })
    }
}

fn parse_lifetime(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        // Sub-second lifetimes would let exp == iat at second resolution.
        Ok(secs) if secs >= 1 && secs <= i64::MAX as u64 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidLifetime(raw.to_string())),
    }
}

fn parse_users(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((user, password)) if !user.is_empty() => {
                Ok((user.to_string(), password.to_string()))
            }
            _ => Err(ConfigError::InvalidUserEntry(entry.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "s3cret")])).unwrap();
        assert_eq!(config.auth.secret, b"s3cret");
        assert_eq!(config.auth.token_lifetime, DEFAULT_TOKEN_LIFETIME);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.users.is_empty());
    }

    #[test]
    fn missing_secret_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret);
    }

    #[test]
    fn empty_secret_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "")])).unwrap_err();
        assert_eq!(err, ConfigError::EmptySecret);
    }

    #[test]
    fn zero_lifetime_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (JWT_SECRET_ENV, "s"),
            (JWT_LIFETIME_ENV, "0"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidLifetime("0".to_string()));
    }

    #[test]
    fn parses_users_and_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (JWT_SECRET_ENV, "s"),
            (JWT_LIFETIME_ENV, "120"),
            (AUTH_USERS_ENV, "alice:pw1, bob:p:w2"),
            (PORT_ENV, "9090"),
            (LOG_FORMAT_ENV, "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.auth.token_lifetime, Duration::from_secs(120));
        assert_eq!(
            config.users,
            vec![
                ("alice".to_string(), "pw1".to_string()),
                ("bob".to_string(), "p:w2".to_string()),
            ]
        );
        assert_eq!(config.port, 9090);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn malformed_user_entry_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (JWT_SECRET_ENV, "s"),
            (AUTH_USERS_ENV, "nopassword"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidUserEntry("nopassword".to_string()));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "topsecret")])).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("topsecret"));
        assert!(rendered.contains("<redacted>"));
    }
}
