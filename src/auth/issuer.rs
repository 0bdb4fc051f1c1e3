// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuance.
//!
//! The issuer never checks passwords itself: callers hand it a subject only
//! after the credential store has accepted the login.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Header};
use thiserror::Error;
use uuid::Uuid;

use super::claims::{timestamp_to_datetime, Claims};
use super::{SigningSecret, TOKEN_ALGORITHM};
use crate::config::ConfigError;

/// Errors raised while issuing a token.
///
/// None of these are recoverable at runtime. An empty subject is a caller
/// bug; a signing failure means the process was misconfigured.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("refusing to issue a token for an empty subject")]
    EmptySubject,

    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// A freshly signed token plus its expiry, for display to the client.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues signed bearer tokens with a fixed lifetime.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    secret: SigningSecret,
    lifetime_secs: i64,
}

impl TokenIssuer {
    /// Create an issuer. The lifetime must be at least one second so that
    /// `exp > iat` always holds.
    pub fn new(secret: SigningSecret, lifetime: Duration) -> Result<Self, ConfigError> {
        let lifetime_secs = i64::try_from(lifetime.as_secs())
            .ok()
            .filter(|secs| *secs >= 1)
            .ok_or_else(|| ConfigError::InvalidLifetime(format!("{}s", lifetime.as_secs())))?;

        Ok(Self {
            secret,
            lifetime_secs,
        })
    }

    /// Token lifetime in seconds.
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Issue a token for `subject`, valid from now.
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, IssueError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if the current time were `now`.
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, IssueError> {
        if subject.is_empty() {
            return Err(IssueError::EmptySubject);
        }

        let iat = now.timestamp();
        let exp = iat.saturating_add(self.lifetime_secs);

        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp,
            jti: Some(Uuid::new_v4().to_string()),
        };

        let token = encode(
            &Header::new(TOKEN_ALGORITHM),
            &claims,
            self.secret.encoding_key(),
        )?;

        Ok(IssuedToken {
            token,
            expires_at: timestamp_to_datetime(exp),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        let secret = SigningSecret::new(b"test_secret_key_for_testing_purposes_only").unwrap();
        TokenIssuer::new(secret, Duration::from_secs(3600)).unwrap()
    }

    #[test]
    fn expiry_is_issued_at_plus_lifetime() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let issued = issuer().issue_at("usuario_demo", now).unwrap();
        assert_eq!(issued.expires_at.timestamp(), 1_700_003_600);
        assert_eq!(issued.token.split('.').count(), 3);
    }

    #[test]
    fn empty_subject_is_refused() {
        let result = issuer().issue("");
        assert!(matches!(result, Err(IssueError::EmptySubject)));
    }

    #[test]
    fn zero_lifetime_is_a_config_error() {
        let secret = SigningSecret::new(b"s").unwrap();
        let result = TokenIssuer::new(secret, Duration::from_millis(500));
        assert!(matches!(result, Err(ConfigError::InvalidLifetime(_))));
    }

    #[test]
    fn same_instant_tokens_are_distinct() {
        let now = Utc::now();
        let issuer = issuer();
        let a = issuer.issue_at("usuario_demo", now).unwrap();
        let b = issuer.issue_at("usuario_demo", now).unwrap();
        assert_ne!(a.token, b.token);
    }
}
