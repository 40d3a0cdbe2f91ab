//! SQL Server connector: connection string, handle, liveness check.
//!
//! [`connect`] is the only place that talks to the server during startup
//! besides the smoke test. Every outcome is appended to the [`LogStore`].

use std::fmt;
use std::time::Duration;

use tiberius::{Client, Config};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use crate::config::{ConnectionParams, ProbeConfig};
use crate::domain::LogStore;
use crate::error::ProbeError;

/// Live driver client over a Tokio TCP stream.
pub type MssqlClient = Client<Compat<TcpStream>>;

/// Status line appended after a successful connect + ping.
pub const CONNECTED_MESSAGE: &str = "Successfully connected to the SQL Server.";

/// ADO-style connection string.
///
/// Holds the plaintext password, so `Debug` and `Display` print a redacted
/// form. Only [`ConnectionString::expose`] returns the real text.
#[derive(Clone)]
pub struct ConnectionString {
    raw: String,
    redacted: String,
}

impl ConnectionString {
    /// Interpolates the connection parameters into an ADO string.
    ///
    /// Every free-text value is double-quoted, so `;`, `=` and `"` inside a
    /// value stay part of that value.
    #[must_use]
    pub fn build(params: &ConnectionParams, port: u16, trust_server_certificate: bool) -> Self {
        let server = quote_ado_value(&format!("tcp:{},{port}", params.host));
        let user = quote_ado_value(&params.user);
        let database = quote_ado_value(&params.database);
        let render = |password: &str| {
            format!(
                "server={server};user id={user};password={};database={database};TrustServerCertificate={trust_server_certificate}",
                quote_ado_value(password),
            )
        };
        Self {
            raw: render(&params.password),
            redacted: render("***"),
        }
    }

    /// Returns the string with the real password, for the driver only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.raw
    }
}

/// Wraps `value` in double quotes, doubling any embedded `"`.
fn quote_ado_value(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConnectionString").field(&self.redacted).finish()
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted)
    }
}

/// Knobs for a connection attempt.
#[derive(Debug, Clone, Copy)]
pub struct ConnectOptions {
    /// Bound on TCP connect + login + ping; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Skip server certificate validation.
    pub trust_server_certificate: bool,
}

impl ConnectOptions {
    /// Derives the options from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &ProbeConfig) -> Self {
        let timeout = (config.connect_timeout_secs > 0)
            .then(|| Duration::from_secs(config.connect_timeout_secs));
        Self {
            timeout,
            trust_server_certificate: config.trust_server_certificate,
        }
    }
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            trust_server_certificate: true,
        }
    }
}

/// Builds the driver configuration without touching the network.
///
/// # Errors
///
/// Returns [`ProbeError::InvalidPort`] if the port is not a `u16`, or
/// [`ProbeError::Driver`] if the driver rejects the connection string.
pub fn open_handle(
    params: &ConnectionParams,
    trust_server_certificate: bool,
) -> Result<Config, ProbeError> {
    let port: u16 = params
        .port
        .trim()
        .parse()
        .map_err(|_| ProbeError::InvalidPort(params.port.clone()))?;
    let conn = ConnectionString::build(params, port, trust_server_certificate);
    tracing::debug!(connection = %conn, "opening sql server handle");
    Ok(Config::from_ado_string(conn.expose())?)
}

/// Issues `SELECT 1` and waits for the row.
///
/// # Errors
///
/// Returns [`ProbeError::Driver`] if the round-trip fails.
pub async fn ping(client: &mut MssqlClient) -> Result<(), ProbeError> {
    client.simple_query("SELECT 1").await?.into_row().await?;
    Ok(())
}

/// Opens a handle, connects, logs in and pings.
///
/// Appends exactly one status line to `log`: the handle failure, the
/// connect failure, or [`CONNECTED_MESSAGE`].
///
/// # Errors
///
/// Returns the underlying [`ProbeError`] after logging it.
pub async fn connect(
    params: &ConnectionParams,
    options: ConnectOptions,
    log: &LogStore,
) -> Result<MssqlClient, ProbeError> {
    let config = match open_handle(params, options.trust_server_certificate) {
        Ok(config) => config,
        Err(e) => {
            log.append(format!("Failed to create DB handle: {e}"));
            return Err(e);
        }
    };

    let attempt = establish(config);
    let result = match options.timeout {
        Some(limit) => tokio::time::timeout(limit, attempt)
            .await
            .unwrap_or_else(|_| Err(ProbeError::ConnectTimeout(limit.as_secs()))),
        None => attempt.await,
    };

    match result {
        Ok(client) => {
            log.append(CONNECTED_MESSAGE);
            Ok(client)
        }
        Err(e) => {
            log.append(format!("Failed to connect to DB: {e}"));
            Err(e)
        }
    }
}

async fn establish(config: Config) -> Result<MssqlClient, ProbeError> {
    let tcp = TcpStream::connect(config.get_addr()).await?;
    tcp.set_nodelay(true)?;
    let mut client = Client::connect(config, tcp.compat_write()).await?;
    ping(&mut client).await?;
    Ok(client)
}
