// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use patient_history_server::api::router;
use patient_history_server::auth::{AccessPolicy, TokenCodec, TokenValidator};
use patient_history_server::config::{Config, DEFAULT_LOG_FILTER, LOG_FORMAT_ENV};
use patient_history_server::state::{AppState, AuthConfig};
use patient_history_server::store::NoteStore;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var(LOG_FORMAT_ENV)
        .is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "Refusing to start");
            std::process::exit(1);
        }
    };
    let Config {
        secret,
        token_lifetime,
        clock_skew,
        exempt_paths,
        addr,
    } = config;

    let validator = TokenValidator::new(TokenCodec::new(&secret), token_lifetime, clock_skew);
    let policy = AccessPolicy::with_exempt_prefixes(exempt_paths);
    if !policy.exempt_prefixes().is_empty() {
        tracing::info!(
            prefixes = ?policy.exempt_prefixes(),
            "Authentication waived for configured path prefixes"
        );
    }

    let state = AppState::new(NoteStore::new(), AuthConfig::new(validator, policy));
    let app = router(state);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%addr, %err, "Failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "Patient history service listening (docs at /docs)");

    if let Err(err) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%err, "Server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    tracing::info!("Shutdown signal received, draining connections");
}
