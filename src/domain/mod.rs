//! Domain layer: status log and smoke-test data.
//!
//! This module contains the append-only [`LogStore`] shared between the
//! connector and the HTTP layer, and the fixed [`TestRow`] the smoke test
//! writes and reads back.

pub mod log_store;
pub mod test_row;

pub use log_store::LogStore;
pub use test_row::{SmokeOutcome, TestRow, UpsertAction};
