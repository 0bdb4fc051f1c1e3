// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request gate for protected calls.
//!
//! Evaluation order is fixed:
//!
//! 1. header absent or empty → [`AuthError::MissingCredentials`]
//! 2. not `Bearer <token>` → [`AuthError::MalformedCredentials`]
//! 3. signature or structure bad → [`AuthError::InvalidToken`]
//! 4. `now >= exp` → [`AuthError::ExpiredToken`]
//! 5. otherwise the token subject is returned
//!
//! Expiry is only looked at once the signature verified, so a forged token
//! never reveals whether it would have been expired.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Validation};

use super::{AuthError, AuthenticatedUser, Claims, SigningSecret, TOKEN_ALGORITHM};

/// Authorization scheme accepted by the guard (compared case-insensitively).
const BEARER_SCHEME: &str = "Bearer";

/// Verifies bearer tokens against the shared signing secret.
///
/// Pure: no I/O, no mutation, no locking. Safe to share across any number of
/// concurrent requests.
#[derive(Clone)]
pub struct AuthGuard {
    secret: SigningSecret,
    validation: Validation,
}

impl AuthGuard {
    pub fn new(secret: SigningSecret) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // Expiry is checked by hand after decoding so the boundary is
        // inclusive and carries no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self { secret, validation }
    }

    /// Authorize a raw `Authorization` header value at the current time.
    pub fn authorize(&self, raw_header: Option<&str>) -> Result<AuthenticatedUser, AuthError> {
        self.authorize_at(raw_header, Utc::now())
    }

    /// Authorize a raw `Authorization` header value as of `now`.
    pub fn authorize_at(
        &self,
        raw_header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedUser, AuthError> {
        let token = extract_bearer_token(raw_header)?;
        self.verify_token_at(token, now)
    }

    /// Authorize the `Authorization` header of an HTTP request.
    ///
    /// A header value that is not valid visible ASCII counts as malformed.
    pub fn authorize_headers(&self, headers: &HeaderMap) -> Result<AuthenticatedUser, AuthError> {
        let raw = headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str().map_err(|_| AuthError::MalformedCredentials))
            .transpose()?;
        self.authorize(raw)
    }

    /// Verify a bare token (no scheme prefix) as of `now`.
    pub fn verify_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedUser, AuthError> {
        let token_data = decode::<Claims>(token, self.secret.decoding_key(), &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;

        let claims = token_data.claims;
        if claims.is_expired_at(now.timestamp()) {
            return Err(AuthError::ExpiredToken);
        }

        // An empty subject is accepted here; preventing it is the issuer's job.
        Ok(AuthenticatedUser::from_claims(claims))
    }
}

impl std::fmt::Debug for AuthGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGuard")
            .field("algorithm", &TOKEN_ALGORITHM)
            .finish_non_exhaustive()
    }
}

/// Split `<scheme> <token>` on the first space and check the scheme.
pub fn extract_bearer_token(raw_header: Option<&str>) -> Result<&str, AuthError> {
    let value = match raw_header {
        None => return Err(AuthError::MissingCredentials),
        Some(value) if value.is_empty() => return Err(AuthError::MissingCredentials),
        Some(value) => value,
    };

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthError::MalformedCredentials)?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.is_empty() {
        return Err(AuthError::MalformedCredentials);
    }

    Ok(token)
}
