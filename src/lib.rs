//! # mssql-probe
//!
//! SQL Server connectivity probe with a small HTTP front end.
//!
//! The probe resolves five connection parameters from the environment,
//! connects and pings the server, optionally runs a create /
//! insert-or-update / read-back smoke test, and then serves the result.
//! The driver work is delegated to `tiberius`; this crate is glue.
//!
//! ## Modes
//!
//! - `logs`: failures are recorded and swallowed; `GET /logs` dumps the
//!   status log.
//! - `status`: any failure aborts startup; `GET /` shows the smoke-test row
//!   and `GET /health` returns a fixed JSON body.
//!
//! ## Architecture
//!
//! ```text
//! ProbeConfig (config/)
//!     │
//!     ├── connect + ping (persistence/connection)
//!     ├── run_smoke_test (service/) ── MssqlStore (persistence/mssql)
//!     │
//!     ├── LogStore (domain/)
//!     │
//!     └── Axum router (api/) ── serve (server)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod server;
pub mod service;
