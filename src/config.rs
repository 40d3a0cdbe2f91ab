//! Probe configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The connection parameters are resolved
//! through an [`EnvPolicy`] that decides what an empty variable means.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::ProbeError;

/// Environment variable holding the SQL Server host.
pub const ENV_SERVER: &str = "MSSQL_SERVER";
/// Environment variable holding the SQL Server port.
pub const ENV_PORT: &str = "MSSQL_PORT";
/// Environment variable holding the login name.
pub const ENV_USER: &str = "MSSQL_USER";
/// Environment variable holding the login password.
pub const ENV_PASSWORD: &str = "MSSQL_PASSWORD";
/// Environment variable holding the database name.
pub const ENV_DATABASE: &str = "MSSQL_DB";

/// Default host used under [`EnvPolicy::Defaulted`].
pub const DEFAULT_SERVER: &str = "localhost";
/// Default port used under [`EnvPolicy::Defaulted`].
pub const DEFAULT_PORT: &str = "1433";
/// Default login used under [`EnvPolicy::Defaulted`].
pub const DEFAULT_USER: &str = "sa";
/// Placeholder password used under [`EnvPolicy::Defaulted`].
pub const DEFAULT_PASSWORD: &str = "YourStrong!Passw0rd";
/// Default database used under [`EnvPolicy::Defaulted`].
pub const DEFAULT_DATABASE: &str = "master";

/// Which HTTP surface and failure policy the probe runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMode {
    /// Connect, record every status line, always serve `GET /logs`.
    Logs,
    /// Connect and run the smoke test; any failure aborts before binding.
    /// Serves `GET /` and `GET /health`.
    Status,
}

impl ProbeMode {
    /// The empty-variable policy this mode resolves connection params with.
    #[must_use]
    pub const fn env_policy(self) -> EnvPolicy {
        match self {
            Self::Logs => EnvPolicy::Verbatim,
            Self::Status => EnvPolicy::Defaulted,
        }
    }
}

impl FromStr for ProbeMode {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logs" => Ok(Self::Logs),
            "status" => Ok(Self::Status),
            other => Err(ProbeError::InvalidConfig(format!(
                "PROBE_MODE must be `logs` or `status`, got `{other}`"
            ))),
        }
    }
}

impl fmt::Display for ProbeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logs => f.write_str("logs"),
            Self::Status => f.write_str("status"),
        }
    }
}

/// How an unset or empty connection variable is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvPolicy {
    /// Unset resolves to `""`; a set value (empty included) is used as-is.
    Verbatim,
    /// Unset or empty resolves to the documented default.
    Defaulted,
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output.
    Text,
    /// One JSON object per event.
    Json,
}

/// The five SQL Server connection parameters.
///
/// Resolved once at startup and never mutated. The `Debug` impl redacts the
/// password.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Server host name or address.
    pub host: String,
    /// TCP port, kept as text until the connector parses it.
    pub port: String,
    /// SQL login name.
    pub user: String,
    /// SQL login password.
    pub password: String,
    /// Database to open.
    pub database: String,
}

impl ConnectionParams {
    /// Resolves the parameters through `lookup` under the given policy.
    ///
    /// Never fails: missing values fall back per [`EnvPolicy`].
    pub fn resolve<F>(policy: EnvPolicy, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| match (policy, lookup(key)) {
            (EnvPolicy::Verbatim, value) => value.unwrap_or_default(),
            (EnvPolicy::Defaulted, Some(value)) if !value.is_empty() => value,
            (EnvPolicy::Defaulted, _) => default.to_string(),
        };

        Self {
            host: get(ENV_SERVER, DEFAULT_SERVER),
            port: get(ENV_PORT, DEFAULT_PORT),
            user: get(ENV_USER, DEFAULT_USER),
            password: get(ENV_PASSWORD, DEFAULT_PASSWORD),
            database: get(ENV_DATABASE, DEFAULT_DATABASE),
        }
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Top-level probe configuration.
///
/// Loaded once at startup via [`ProbeConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Which variant of the probe to run.
    pub mode: ProbeMode,

    /// Socket address to bind the HTTP server to (default `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Resolved SQL Server connection parameters.
    pub connection: ConnectionParams,

    /// Upper bound in seconds for connect + login + ping (0 = no limit).
    pub connect_timeout_secs: u64,

    /// Accept the server certificate without validation.
    pub trust_server_certificate: bool,

    /// Tracing output format.
    pub log_format: LogFormat,
}

impl ProbeConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidConfig`] if `PROBE_MODE` or
    /// `LISTEN_ADDR` is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ProbeError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidConfig`] if `PROBE_MODE` or
    /// `LISTEN_ADDR` is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProbeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode: ProbeMode = lookup("PROBE_MODE")
            .unwrap_or_else(|| "status".to_string())
            .parse()?;

        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let listen_addr: SocketAddr = raw_addr.parse().map_err(|e| {
            ProbeError::InvalidConfig(format!("LISTEN_ADDR `{raw_addr}` is invalid: {e}"))
        })?;

        let policy = match parse_bool(lookup("MSSQL_EMPTY_AS_UNSET").as_deref()) {
            Some(true) => EnvPolicy::Defaulted,
            Some(false) => EnvPolicy::Verbatim,
            None => mode.env_policy(),
        };
        let connection = ConnectionParams::resolve(policy, &lookup);

        let connect_timeout_secs = parse_or(lookup("MSSQL_CONNECT_TIMEOUT_SECS"), 30);
        let trust_server_certificate =
            parse_bool(lookup("MSSQL_TRUST_CERT").as_deref()).unwrap_or(true);

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            mode,
            listen_addr,
            connection,
            connect_timeout_secs,
            trust_server_certificate,
            log_format,
        })
    }
}

/// Parses `value` as `T`, returning `default` on missing or invalid input.
fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Accepts `"true"`, `"1"`, `"false"`, `"0"` (case-insensitive).
fn parse_bool(value: Option<&str>) -> Option<bool> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("true") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        _ => None,
    }
}
