//! End-to-end startup behaviour against an unreachable SQL Server.

#![allow(clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;

use mssql_probe::api;
use mssql_probe::config::{ProbeConfig, ProbeMode};
use mssql_probe::domain::LogStore;
use mssql_probe::service::{start_logs_mode, start_status_mode};

/// Port 1 on loopback refuses connections on any sane host.
fn unreachable_config(mode: &str) -> ProbeConfig {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("PROBE_MODE", mode),
        ("LISTEN_ADDR", "127.0.0.1:0"),
        ("MSSQL_SERVER", "127.0.0.1"),
        ("MSSQL_PORT", "1"),
        ("MSSQL_USER", "sa"),
        ("MSSQL_PASSWORD", "irrelevant"),
        ("MSSQL_DB", "master"),
        ("MSSQL_CONNECT_TIMEOUT_SECS", "5"),
    ]);
    let Ok(config) = ProbeConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string()))
    else {
        panic!("test config must load");
    };
    config
}

#[tokio::test]
async fn status_mode_fails_before_serving() {
    let config = unreachable_config("status");
    let log = Arc::new(LogStore::new());

    let result = start_status_mode(&config, Arc::clone(&log)).await;

    assert!(result.is_err());
    let entries = log.snapshot();
    assert_eq!(entries.len(), 1);
    assert!(entries.iter().all(|e| e.starts_with("Failed to connect to DB: ")));
}

#[tokio::test]
async fn logs_mode_serves_failure_messages() {
    let config = unreachable_config("logs");
    assert_eq!(config.mode, ProbeMode::Logs);
    let log = Arc::new(LogStore::new());

    let state = start_logs_mode(&config, Arc::clone(&log)).await;
    let app = api::build_app(config.mode, state);

    let Ok(listener) = tokio::net::TcpListener::bind(config.listen_addr).await else {
        panic!("bind loopback");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener address");
    };
    log.append(format!("Starting web server on {addr}..."));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let Ok(response) = reqwest::get(format!("http://{addr}/logs")).await else {
        panic!("GET /logs");
    };
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let Ok(body) = response.text().await else {
        panic!("read body");
    };

    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 3, "{body}");
    let [connect, summary, starting] = lines.as_slice() else {
        panic!("expected three lines");
    };
    assert!(connect.starts_with("Failed to connect to DB: "));
    assert!(summary.starts_with("Error while connecting to SQL Server: "));
    assert_eq!(*starting, format!("Starting web server on {addr}..."));
}
