// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Public and protected demonstration endpoints.

use axum::{Extension, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::AuthenticatedUser;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SecretResponse {
    pub message: String,
    pub secret: String,
    /// Subject the request was authenticated as
    pub user_id: String,
}

/// Endpoint anyone can call.
#[utoipa::path(
    get,
    path = "/v1/public",
    tag = "Demo",
    responses((status = 200, description = "Public message", body = MessageResponse))
)]
pub async fn public_message() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "This is a public endpoint, anyone can access it".to_string(),
    })
}

/// Endpoint behind the auth middleware.
#[utoipa::path(
    get,
    path = "/v1/secret",
    tag = "Demo",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Secret revealed", body = SecretResponse),
        (status = 401, description = "Missing, malformed, invalid or expired token"),
    )
)]
pub async fn protected_secret(Extension(user): Extension<AuthenticatedUser>) -> Json<SecretResponse> {
    Json(SecretResponse {
        message: "You have accessed the secret with a bearer token".to_string(),
        secret: "The answer to life, the universe and everything is 42".to_string(),
        user_id: user.user_id,
    })
}
