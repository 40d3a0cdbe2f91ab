//! Persistence layer: SQL Server connector and smoke-test table access.
//!
//! Provides the [`SmokeStore`] trait the smoke-test runner drives. The
//! concrete implementation, [`mssql::MssqlStore`], wraps a `tiberius`
//! client opened by [`connection::connect`].

pub mod connection;
pub mod mssql;

use crate::domain::TestRow;
use crate::error::ProbeError;

pub use connection::{ConnectOptions, MssqlClient, connect};
pub use mssql::MssqlStore;

/// Table operations needed by the smoke test.
///
/// Each call is its own statement; no transaction spans them.
#[allow(async_fn_in_trait)]
pub trait SmokeStore {
    /// Creates the test table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] on database failure.
    async fn ensure_table(&mut self) -> Result<(), ProbeError>;

    /// Inserts a new row. Fails if `id` already exists.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] on database failure or key conflict.
    async fn insert_row(&mut self, id: i32, name: &str) -> Result<(), ProbeError>;

    /// Overwrites the name of an existing row.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] on database failure.
    async fn update_row(&mut self, id: i32, name: &str) -> Result<(), ProbeError>;

    /// Reads a row by primary key.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] on database failure.
    async fn fetch_row(&mut self, id: i32) -> Result<Option<TestRow>, ProbeError>;
}
