// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// If [`require_auth`](super::middleware::require_auth) already ran for this
/// route, the user it resolved is reused. Otherwise the `Authorization`
/// header is checked by the [`AuthGuard`](super::AuthGuard) in `AppState`.
///
/// # Example
///
/// ```rust,ignore
/// async fn whoami(Auth(user): Auth) -> Json<String> {
///     Json(user.user_id)
/// }
/// ```
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        match state.guard.authorize_headers(&parts.headers) {
            Ok(user) => Ok(Auth(user)),
            Err(err) => {
                tracing::debug!(
                    error_code = err.error_code(),
                    path = %parts.uri.path(),
                    "Rejected request"
                );
                Err(err)
            }
        }
    }
}

/// Optional authentication extractor.
///
/// Returns `None` if no valid authentication is present, instead of rejecting.
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match Auth::from_request_parts(parts, state).await {
            Ok(Auth(user)) => Ok(OptionalAuth(Some(user))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}
