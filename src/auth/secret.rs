// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Process-wide signing secret.

use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::config::ConfigError;

/// Shared HMAC secret used by both [`super::TokenIssuer`] and [`super::AuthGuard`].
///
/// Created once at startup and never mutated. Cloning shares the same key
/// material. An empty secret is refused, since it would let anyone forge tokens.
#[derive(Clone)]
pub struct SigningSecret {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl SigningSecret {
    /// Build a secret from raw bytes.
    pub fn new(secret: &[u8]) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        Ok(Self {
            encoding: Arc::new(EncodingKey::from_secret(secret)),
            decoding: Arc::new(DecodingKey::from_secret(secret)),
        })
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
