// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{AuthGuard, SigningSecret, TokenIssuer};
use crate::config::{AuthSettings, ConfigError};
use crate::store::CredentialStore;

/// Shared application state.
///
/// Everything in here is immutable after startup, so it is shared through
/// `Arc` without any lock.
#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<TokenIssuer>,
    pub guard: Arc<AuthGuard>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    pub fn new(settings: &AuthSettings, credentials: Arc<dyn CredentialStore>) -> Result<Self, ConfigError> {
        let secret = SigningSecret::new(&settings.secret)?;
        let issuer = TokenIssuer::new(secret.clone(), settings.token_lifetime)?;
        let guard = AuthGuard::new(secret);

        Ok(Self {
            issuer: Arc::new(issuer),
            guard: Arc::new(guard),
            credentials,
        })
    }
}

/// State with a known secret and a single `usuario_demo` / `password123` user.
#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use crate::config::DEFAULT_TOKEN_LIFETIME;
    use crate::store::InMemoryCredentialStore;

    let settings = AuthSettings {
        secret: b"test_secret_key_for_testing_purposes_only".to_vec(),
        token_lifetime: DEFAULT_TOKEN_LIFETIME,
    };
    let store = InMemoryCredentialStore::with_users([("usuario_demo", "password123")])
        .expect("rng available in tests");
    AppState::new(&settings, Arc::new(store)).expect("valid test settings")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryCredentialStore;
    use std::time::Duration;

    #[test]
    fn empty_secret_prevents_state_construction() {
        let settings = AuthSettings {
            secret: Vec::new(),
            token_lifetime: Duration::from_secs(60),
        };
        let store = Arc::new(InMemoryCredentialStore::new().unwrap());
        let result = AppState::new(&settings, store);
        assert!(matches!(result, Err(ConfigError::EmptySecret)));
    }

    #[test]
    fn issuer_and_guard_share_the_secret() {
        let state = test_state();
        let issued = state.issuer.issue("usuario_demo").unwrap();
        let user = state.guard.verify_token_at(&issued.token, chrono::Utc::now()).unwrap();
        assert_eq!(user.user_id, "usuario_demo");
    }
}
