// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applies the [`AuthGuard`](super::AuthGuard) to an entire router subtree.
//! On success the resolved [`AuthenticatedUser`] is placed in the request
//! extensions, where handlers (or the [`Auth`](super::Auth) extractor) pick
//! it up. On failure the request never reaches the handler.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/secret", get(secret))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Authentication middleware function.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.guard.authorize_headers(request.headers()) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!(
                error_code = err.error_code(),
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected request"
            );
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use crate::state::test_state;
    use axum::{
        body::{to_bytes, Body},
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        user.user_id
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .route_layer(from_fn_with_state(state.clone(), require_auth))
            .with_state(state)
    }

    #[tokio::test]
    async fn injects_user_into_extensions() {
        let state = test_state();
        let token = state.issuer.issue("usuario_demo").unwrap().token;

        let response = app(state)
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"usuario_demo");
    }

    #[tokio::test]
    async fn short_circuits_without_header() {
        let response = app(test_state())
            .oneshot(HttpRequest::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error_code"], "missing_credentials");
    }
}
