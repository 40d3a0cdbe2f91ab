//! Probe error types.
//!
//! [`ProbeError`] is the central error type for the probe. The connector and
//! the smoke-test runner return it; the binary decides whether an error is
//! logged and swallowed (`logs` mode) or fatal (`status` mode).

/// Library-wide error enum.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// A configuration value was present but unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The port parameter is not a valid TCP port.
    #[error("invalid port: `{0}`")]
    InvalidPort(String),

    /// Error reported by the SQL Server driver.
    #[error("{0}")]
    Driver(#[from] tiberius::error::Error),

    /// Socket-level failure while reaching the server.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Connect, login and ping did not finish in time.
    #[error("connection attempt timed out after {0}s")]
    ConnectTimeout(u64),

    /// The smoke-test row could not be read back.
    #[error("test row with id {0} not found")]
    RowMissing(i32),
}
