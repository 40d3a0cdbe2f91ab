//! mssql-probe entry point.
//!
//! Resolves configuration, runs the startup sequence for the configured
//! mode, then serves HTTP until shutdown.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use mssql_probe::api;
use mssql_probe::config::{LogFormat, ProbeConfig, ProbeMode};
use mssql_probe::domain::LogStore;
use mssql_probe::server;
use mssql_probe::service::{start_logs_mode, start_status_mode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so LOG_FORMAT applies
    let config = ProbeConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(
        mode = %config.mode,
        addr = %config.listen_addr,
        server = %config.connection.host,
        port = %config.connection.port,
        database = %config.connection.database,
        "starting mssql-probe"
    );

    let log = Arc::new(LogStore::new());

    // Build application state
    let state = match config.mode {
        ProbeMode::Logs => start_logs_mode(&config, Arc::clone(&log)).await,
        ProbeMode::Status => start_status_mode(&config, Arc::clone(&log))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "startup failed, not serving"))?,
    };

    let app = api::build_app(config.mode, state);

    // Start server
    log.append(format!("Starting web server on {}...", config.listen_addr));
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    server::serve(listener, app).await?;

    Ok(())
}
