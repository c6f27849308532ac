//! sitemeter metrics server
//!
//! - `GET /metrics` : process + request metrics, Prometheus text format
//! - `GET /healthz` : liveness
//! - Config: `$SITEMETER_CONFIG` (must exist when set), else `sitemeter.yaml` if present,
//!   else defaults. `$PORT` overrides the port

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use sitemeter_core::error::{Result, SiteError};
use sitemeter_server::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "sitemeter.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.code().as_str(), "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let explicit = std::env::var_os("SITEMETER_CONFIG").map(PathBuf::from);
    let mut cfg = config::load_selected(explicit.as_deref(), DEFAULT_CONFIG_PATH)?;
    cfg.server.apply_port_override(std::env::var("PORT").ok().as_deref())?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| SiteError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SiteError::Internal(format!("server failed: {e}")))?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
