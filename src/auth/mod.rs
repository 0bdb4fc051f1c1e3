// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer-token authentication: credential login, HS256 token issuance, and
//! the per-request guard that admits or rejects protected calls.
//!
//! ## Auth Flow
//!
//! 1. Client sends `POST /v1/auth/login` with `{username, password}`
//! 2. The credential store verifies the pair (see [`crate::store`])
//! 3. [`TokenIssuer`] signs `{sub, iat, exp, jti}` with the [`SigningSecret`]
//! 4. Client sends `Authorization: Bearer <token>` on protected calls
//! 5. [`AuthGuard`] verifies the signature, then the expiry, and yields the subject
//!
//! ## Statelessness
//!
//! The only shared value is the signing secret, which is immutable after
//! startup. There is no token store, session table, or revocation list: a
//! token is valid on any replica holding the same secret, so the service can
//! scale horizontally without session affinity. Issuer and guard never lock,
//! block, or perform I/O.
//!
//! ## Security
//!
//! - Tokens are tamper-evident, not confidential (claims are readable)
//! - Expiry is only evaluated after the signature checks out
//! - Expiry is inclusive: a token is rejected at `now >= exp`, with no leeway

pub mod claims;
pub mod error;
pub mod extractor;
pub mod guard;
pub mod issuer;
pub mod middleware;
pub mod secret;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use extractor::{Auth, OptionalAuth};
pub use guard::AuthGuard;
pub use issuer::{IssueError, IssuedToken, TokenIssuer};
pub use secret::SigningSecret;

/// The single signing algorithm used for both issuance and verification.
pub(crate) const TOKEN_ALGORITHM: jsonwebtoken::Algorithm = jsonwebtoken::Algorithm::HS256;
