mod app;
mod config;
mod prefs_store;
mod routes;
mod services;
mod state;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use vital_shared::{Catalogue, CatalogueError};

use crate::state::AppState;

#[derive(Debug, Error)]
enum CatalogueLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid catalogue {path}: {source}")]
    Invalid {
        path: PathBuf,
        source: CatalogueError,
    },
}

fn load_catalogue(path: Option<&Path>) -> Result<Catalogue, CatalogueLoadError> {
    let Some(path) = path else {
        return Ok(Catalogue::builtin().clone());
    };
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogueLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Catalogue::from_json(&raw).map_err(|source| CatalogueLoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let catalogue = match load_catalogue(config::catalogue_path().as_deref()) {
        Ok(catalogue) => catalogue,
        Err(e) => {
            tracing::error!(error = %e, "failed to load city catalogue");
            return;
        }
    };
    tracing::info!(cities = catalogue.len(), "City catalogue loaded");

    let state = AppState::new(catalogue, config::preferences_path(), config::static_dir());
    tracing::info!(
        static_dir = %state.static_dir.display(),
        max_sessions = state.max_sessions,
        "Session store ready"
    );

    tokio::spawn(services::session_evictor::run(state.clone()));

    let app = app::build_app(state);

    let addr = format!("0.0.0.0:{}", config::server_port());
    tracing::info!("Vital dashboard server listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind TCP listener");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
    }

    tracing::info!("Server shut down gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                return;
            }
        };
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
