//! devdemo server binary.
//!
//! Routes: `GET /healthz`, `POST /echo`, `GET /metrics`.
//! Config: optional YAML file (first argument, default `devdemo.yaml`).
//! Logging: `RUST_LOG` filter, `info` when unset.

use std::path::Path;

use tokio::sync::oneshot;
use tracing_subscriber::{fmt, EnvFilter};

use devdemo_core::error::{DemoError, Result};
use devdemo_server::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "devdemo.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let state = app_state::AppState::new(load_config()?);
    let listen = state.cfg().server.listen_addr()?;
    let grace = state.cfg().server.shutdown_grace();
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| DemoError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "devdemo-server starting");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        res = &mut server => return flatten(res),
        _ = shutdown_signal() => {}
    }

    let _ = stop_tx.send(());
    match tokio::time::timeout(grace, server).await {
        Ok(res) => flatten(res)?,
        Err(_) => tracing::warn!(grace_ms = grace.as_millis() as u64, "shutdown grace elapsed, dropping in-flight requests"),
    }

    tracing::info!("devdemo-server stopped");
    Ok(())
}

fn load_config() -> Result<config::ServerConfig> {
    match std::env::args().nth(1) {
        Some(path) => config::load_from_file(&path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => config::load_from_file(DEFAULT_CONFIG_PATH),
        None => {
            tracing::info!("no config file, using defaults");
            Ok(config::ServerConfig::default())
        }
    }
}

fn flatten(
    res: std::result::Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<()> {
    match res {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(DemoError::Internal(format!("server failed: {e}"))),
        Err(e) => Err(DemoError::Internal(format!("server task failed: {e}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("signal received, starting graceful shutdown");
}
