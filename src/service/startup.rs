//! Startup sequences for the two probe modes.
//!
//! Both run before the listener is bound and produce the [`AppState`] the
//! router serves. They differ only in what a failure means.

use std::sync::Arc;

use super::run_smoke_test;
use crate::app_state::AppState;
use crate::config::ProbeConfig;
use crate::domain::LogStore;
use crate::error::ProbeError;
use crate::persistence::{ConnectOptions, MssqlStore, connect};

/// `logs` mode: connect once and record the outcome. Never fails.
pub async fn start_logs_mode(config: &ProbeConfig, log: Arc<LogStore>) -> AppState {
    let options = ConnectOptions::from_config(config);
    match connect(&config.connection, options, &log).await {
        Ok(_client) => log.append("Connection established successfully."),
        Err(e) => log.append(format!("Error while connecting to SQL Server: {e}")),
    }
    AppState::with_log(log)
}

/// `status` mode: connect and run the smoke test.
///
/// # Errors
///
/// Returns the first [`ProbeError`] from connecting or from the smoke
/// test. The caller is expected to exit without serving.
pub async fn start_status_mode(
    config: &ProbeConfig,
    log: Arc<LogStore>,
) -> Result<AppState, ProbeError> {
    let options = ConnectOptions::from_config(config);
    let client = connect(&config.connection, options, &log).await?;

    let mut store = MssqlStore::new(client);
    let outcome = run_smoke_test(&mut store, &log).await?;
    tracing::info!(
        id = outcome.row.id,
        name = %outcome.row.name,
        created_at = %outcome.row.created_at,
        action = outcome.action.as_str(),
        "smoke test completed"
    );

    Ok(AppState::with_outcome(log, outcome))
}
