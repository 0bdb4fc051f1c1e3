// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential store used by the login endpoint.
//!
//! The auth core only ever calls [`CredentialStore::verify`]; how credentials
//! are kept is an implementation detail. The in-memory store here never holds
//! raw passwords: it keeps an HMAC-SHA256 tag of each password under a random
//! per-process key and compares tags in constant time.

use std::collections::HashMap;

use hmac::digest::generic_array::GenericArray;
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// HMAC key length (SHA-256 block size).
const PEPPER_LEN: usize = 64;

/// Capability the login flow needs from a credential backend.
pub trait CredentialStore: Send + Sync {
    /// Whether `password` is correct for `username`.
    ///
    /// Unknown users and wrong passwords both return `false`.
    fn verify(&self, username: &str, password: &str) -> bool;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("system random number generator unavailable")]
    Rng,
}

/// In-memory credential store seeded at startup.
pub struct InMemoryCredentialStore {
    pepper: [u8; PEPPER_LEN],
    users: HashMap<String, Vec<u8>>,
    /// Compared against for unknown users so lookups take the same path
    dummy_tag: Vec<u8>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Result<Self, StoreError> {
        let rng = SystemRandom::new();
        let mut pepper = [0u8; PEPPER_LEN];
        rng.fill(&mut pepper).map_err(|_| StoreError::Rng)?;

        let mut store = Self {
            pepper,
            users: HashMap::new(),
            dummy_tag: Vec::new(),
        };
        store.dummy_tag = store.tag("");
        Ok(store)
    }

    /// Build a store holding the given `(username, password)` pairs.
    pub fn with_users<I, U, P>(users: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: AsRef<str>,
    {
        let mut store = Self::new()?;
        for (username, password) in users {
            store.insert_user(username, password.as_ref());
        }
        Ok(store)
    }

    /// Add or replace a user.
    pub fn insert_user(&mut self, username: impl Into<String>, password: &str) {
        let tag = self.tag(password);
        self.users.insert(username.into(), tag);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn mac(&self, password: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new(GenericArray::from_slice(&self.pepper));
        mac.update(password.as_bytes());
        mac
    }

    fn tag(&self, password: &str) -> Vec<u8> {
        self.mac(password).finalize().into_bytes().to_vec()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn verify(&self, username: &str, password: &str) -> bool {
        match self.users.get(username) {
            Some(expected) => self.mac(password).verify_slice(expected).is_ok(),
            None => {
                let _ = self.mac(password).verify_slice(&self.dummy_tag);
                false
            }
        }
    }
}

impl std::fmt::Debug for InMemoryCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCredentialStore")
            .field("users", &self.users.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryCredentialStore {
        InMemoryCredentialStore::with_users([("usuario_demo", "password123")]).unwrap()
    }

    #[test]
    fn accepts_correct_password() {
        assert!(store().verify("usuario_demo", "password123"));
    }

    #[test]
    fn rejects_wrong_password_and_unknown_user() {
        let store = store();
        assert!(!store.verify("usuario_demo", "wrong"));
        assert!(!store.verify("nobody", "password123"));
        assert!(!store.verify("", ""));
    }

    #[test]
    fn unknown_user_with_empty_password_is_rejected() {
        // The dummy tag is the tag of "", which must not grant access.
        assert!(!store().verify("nobody", ""));
    }

    #[test]
    fn raw_passwords_are_not_kept() {
        let store = store();
        let tag = &store.users["usuario_demo"];
        assert_ne!(tag.as_slice(), b"password123");
        assert_eq!(tag.len(), 32);
        assert!(!format!("{store:?}").contains("password123"));
    }

    #[test]
    fn insert_user_replaces_password() {
        let mut store = store();
        store.insert_user("usuario_demo", "rotated");
        assert!(!store.verify("usuario_demo", "password123"));
        assert!(store.verify("usuario_demo", "rotated"));
        assert_eq!(store.len(), 1);
    }
}
