//! Service layer: the startup smoke test and per-mode startup sequences.
//!
//! The runner is generic over [`crate::persistence::SmokeStore`] so it can
//! be exercised without a live SQL Server.

pub mod smoke_test;
pub mod startup;

pub use smoke_test::run_smoke_test;
pub use startup::{start_logs_mode, start_status_mode};
