//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::{LogStore, SmokeOutcome};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Everything here is captured during startup and only read afterwards,
/// except the log store, which stays appendable.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Status log written by the connector and the smoke test.
    pub log: Arc<LogStore>,
    /// Last smoke-test result; `None` when the smoke test did not run.
    pub smoke: Option<Arc<SmokeOutcome>>,
}

impl AppState {
    /// State for `logs` mode: a log store and no smoke-test result.
    #[must_use]
    pub fn with_log(log: Arc<LogStore>) -> Self {
        Self { log, smoke: None }
    }

    /// State for `status` mode.
    #[must_use]
    pub fn with_outcome(log: Arc<LogStore>, outcome: SmokeOutcome) -> Self {
        Self {
            log,
            smoke: Some(Arc::new(outcome)),
        }
    }
}
