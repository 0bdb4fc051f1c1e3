// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, process::ExitCode, sync::Arc, time::Duration};

use token_gate::{
    api::router,
    config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER},
    state::AppState,
    store::InMemoryCredentialStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing(LogFormat::from_env());

    // Any configuration problem stops the process before a socket is bound.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let store = match InMemoryCredentialStore::with_users(config.users.iter().cloned()) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize credential store");
            return ExitCode::FAILURE;
        }
    };
    if store.is_empty() {
        tracing::warn!("No users configured (AUTH_USERS); every login will be rejected");
    }

    let state = match AppState::new(&config.auth, Arc::new(store)) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Invalid authentication settings");
            return ExitCode::FAILURE;
        }
    };

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, host = %config.host, "Failed to parse bind address");
            return ExitCode::FAILURE;
        }
    };

    let handle = axum_server::Handle::new();
    tokio::spawn({
        let handle = handle.clone();
        async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        }
    });

    tracing::info!(
        %addr,
        token_lifetime_secs = state.issuer.lifetime_secs(),
        "Token gate listening (docs at /docs)"
    );

    if let Err(e) = axum_server::bind(addr)
        .handle(handle)
        .serve(router(state).into_make_service())
        .await
    {
        tracing::error!(error = %e, "HTTP server failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
