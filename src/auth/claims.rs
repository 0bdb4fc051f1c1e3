// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and authenticated user representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims bound into every issued token.
///
/// Timestamps are Unix seconds, as in any JWT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (authenticated principal)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp (`iat + lifetime`)
    pub exp: i64,

    /// Unique token ID, keeps same-second tokens distinct
    #[serde(default)]
    pub jti: Option<String>,
}

impl Claims {
    /// Whether the token is expired at `now` (Unix seconds).
    ///
    /// The boundary is inclusive: a token is already expired at `now == exp`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// Authenticated principal resolved by the guard.
///
/// This is the value handlers receive, either through the
/// [`Auth`](super::Auth) extractor or from request extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Token subject (username)
    pub user_id: String,

    /// When the presented token was issued
    pub issued_at: DateTime<Utc>,

    /// When the presented token expires
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    /// Build from verified claims.
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            issued_at: timestamp_to_datetime(claims.iat),
            expires_at: timestamp_to_datetime(claims.exp),
        }
    }
}

/// Convert Unix seconds into a UTC datetime, clamping out-of-range values.
pub(crate) fn timestamp_to_datetime(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or(if secs < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
