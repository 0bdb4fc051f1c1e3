// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{auth::AuthError, error::ApiError, state::AppState};

/// Login request body.
///
/// Both fields are optional at the serde level so a missing field becomes a
/// `400` rather than a generic deserialization rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token
    pub token: String,
    /// Token expiry (RFC 3339, UTC)
    #[serde(rename = "expiresAt")]
    pub expires_at: String,
}

/// Exchange a username and password for a bearer token.
///
/// Wrong passwords and unknown usernames produce the same response.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Username and password are required"),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable login body");
            return Err(missing_fields());
        }
    };

    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(missing_fields());
    };

    if !state.credentials.verify(&username, &password) {
        tracing::info!(username = %username, "Login rejected");
        return Err(AuthError::InvalidCredentials.into());
    }

    let issued = state.issuer.issue(&username)?;
    tracing::info!(username = %username, expires_at = %issued.expires_at, "Issued token");

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    }))
}

fn missing_fields() -> ApiError {
    ApiError::bad_request("Username and password are required")
}
