// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token Gate - Bearer Token Authentication Service
//!
//! Credential login, HS256 token issuance and per-request token
//! verification, exposed over an Axum router.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token issuer, auth guard, extractor and middleware
//! - `config` - Environment configuration
//! - `store` - Credential store behind the login endpoint

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;
pub mod store;
