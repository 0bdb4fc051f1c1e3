// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// Every variant is a client-input error: never retried, never fatal to the
/// process. All of them map to `401 Unauthorized`; the distinct
/// [`error_code`](AuthError::error_code) is kept for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No authorization header present, or it is empty
    MissingCredentials,
    /// Authorization header is not of the form `Bearer <token>`
    MalformedCredentials,
    /// Token structure is corrupt or its signature does not verify
    InvalidToken,
    /// Token signature is valid but it has expired
    ExpiredToken,
    /// Login rejected (unknown user or wrong password, deliberately indistinguishable)
    InvalidCredentials,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "missing_credentials",
            AuthError::MalformedCredentials => "malformed_credentials",
            AuthError::InvalidToken => "invalid_token",
            AuthError::ExpiredToken => "expired_token",
            AuthError::InvalidCredentials => "invalid_credentials",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Authorization header is required"),
            AuthError::MalformedCredentials => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::InvalidToken => write!(f, "Token is invalid"),
            AuthError::ExpiredToken => write!(f, "Token has expired"),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        let mut response = (status, body).into_response();
        if self != AuthError::InvalidCredentials {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
