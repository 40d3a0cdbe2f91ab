//! HTTP endpoint handlers organized by probe mode.

pub mod logs;
pub mod status;
pub mod system;

use axum::Router;

use crate::app_state::AppState;
use crate::config::ProbeMode;

/// Composes the routes served in the given mode.
pub fn routes(mode: ProbeMode) -> Router<AppState> {
    match mode {
        ProbeMode::Logs => logs::routes(),
        ProbeMode::Status => Router::new()
            .merge(status::routes())
            .merge(system::routes()),
    }
}
