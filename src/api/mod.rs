// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{middleware::require_auth, AuthenticatedUser},
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod secret;
pub mod users;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/secret", get(secret::protected_secret))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let v1_routes = Router::new()
        .route("/public", get(secret::public_message))
        .route("/auth/login", post(auth::login))
        .route("/users/me", get(users::get_current_user))
        .merge(protected)
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        secret::public_message,
        secret::protected_secret,
        users::get_current_user,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::LoginResponse,
            secret::MessageResponse,
            secret::SecretResponse,
            users::UserMeResponse,
            health::ReadyResponse,
            health::HealthResponse,
            AuthenticatedUser
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Auth", description = "Credential login and token issuance"),
        (name = "Users", description = "Authenticated user information"),
        (name = "Demo", description = "Public and protected sample endpoints"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
