//! Foreign server, user mapping and foreign table options.
//!
//! Options arrive from the host catalog as lists of `(name, value)` strings
//! attached to one of three objects. [`validate_option`] checks a single
//! entry against the object it is attached to; [`FdwOptions::from_lists`]
//! merges all three lists onto the loaded defaults.

use std::fmt::{self, Display};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consistency::ConsistencyLevel;
use crate::error::{ConfigError, Result};

// ============================================================================
// Option names
// ============================================================================

pub const OPT_HOST: &str = "host";
pub const OPT_PORT: &str = "port";
pub const OPT_PROTOCOL_VERSION: &str = "protocol_version";
pub const OPT_SSL: &str = "ssl";
pub const OPT_SSL_CERT: &str = "ssl_cert";
pub const OPT_SSL_KEY: &str = "ssl_key";
pub const OPT_SSL_CA: &str = "ssl_ca";
pub const OPT_CONNECT_TIMEOUT: &str = "connect_timeout";
pub const OPT_REQUEST_TIMEOUT: &str = "request_timeout";
pub const OPT_CONSISTENCY: &str = "consistency";

pub const OPT_USERNAME: &str = "username";
pub const OPT_PASSWORD: &str = "password";

pub const OPT_KEYSPACE: &str = "keyspace";
pub const OPT_TABLE: &str = "table";
pub const OPT_PRIMARY_KEY: &str = "primary_key";
pub const OPT_CLUSTERING_KEY: &str = "clustering_key";

/// Catalog object an option is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionContext {
    Server,
    UserMapping,
    Table,
}

impl OptionContext {
    /// Options accepted in this context, in catalog order.
    pub fn valid_options(self) -> &'static [&'static str] {
        match self {
            OptionContext::Server => &[
                OPT_HOST,
                OPT_PORT,
                OPT_PROTOCOL_VERSION,
                OPT_SSL,
                OPT_SSL_CERT,
                OPT_SSL_KEY,
                OPT_SSL_CA,
                OPT_CONNECT_TIMEOUT,
                OPT_REQUEST_TIMEOUT,
                OPT_CONSISTENCY,
            ],
            OptionContext::UserMapping => &[OPT_USERNAME, OPT_PASSWORD],
            OptionContext::Table => &[OPT_KEYSPACE, OPT_TABLE, OPT_PRIMARY_KEY, OPT_CLUSTERING_KEY],
        }
    }

    const ALL: [OptionContext; 3] = [
        OptionContext::Server,
        OptionContext::UserMapping,
        OptionContext::Table,
    ];
}

impl Display for OptionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionContext::Server => write!(f, "foreign server"),
            OptionContext::UserMapping => write!(f, "user mapping"),
            OptionContext::Table => write!(f, "foreign table"),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validates one option attached to a `context` object.
///
/// The name must belong to the context; `port`, `consistency`, `ssl`,
/// `protocol_version` and the two timeouts must also have well-formed values.
pub fn validate_option(name: &str, value: &str, context: OptionContext) -> Result<()> {
    if !context.valid_options().contains(&name) {
        let elsewhere = OptionContext::ALL
            .into_iter()
            .any(|other| other.valid_options().contains(&name));
        if elsewhere {
            return Err(ConfigError::OptionNotAllowed {
                name: name.to_string(),
                context,
            });
        }
        return Err(ConfigError::InvalidOption {
            name: name.to_string(),
            context,
            valid: context.valid_options().to_vec(),
        });
    }

    match name {
        OPT_PORT => {
            parse_port(value)?;
        }
        OPT_CONSISTENCY => {
            value.parse::<ConsistencyLevel>()?;
        }
        OPT_SSL => {
            parse_bool(name, value)?;
        }
        OPT_PROTOCOL_VERSION => {
            parse_protocol_version(value)?;
        }
        OPT_CONNECT_TIMEOUT | OPT_REQUEST_TIMEOUT => {
            parse_millis(name, value)?;
        }
        _ => {}
    }
    Ok(())
}

/// Validates every option in a list.
pub fn validate_options<K, V>(options: &[(K, V)], context: OptionContext) -> Result<()>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    options
        .iter()
        .try_for_each(|(name, value)| validate_option(name.as_ref(), value.as_ref(), context))
}

fn parse_port(value: &str) -> Result<u16> {
    value
        .parse::<u16>()
        .ok()
        .filter(|port| *port >= 1)
        .ok_or_else(|| ConfigError::InvalidPort(value.to_string()))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: "expected a boolean",
        }),
    }
}

fn parse_protocol_version(value: &str) -> Result<u8> {
    value
        .parse::<u8>()
        .ok()
        .filter(|v| (1..=5).contains(v))
        .ok_or_else(|| ConfigError::InvalidValue {
            name: OPT_PROTOCOL_VERSION.to_string(),
            value: value.to_string(),
            reason: "expected a protocol version between 1 and 5",
        })
}

fn parse_millis(name: &str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
        reason: "expected a whole number of milliseconds",
    })
}

// ============================================================================
// Option sets
// ============================================================================

/// Connection settings of a foreign server. Also the `[server]` section of
/// the configuration file, which supplies defaults for every server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerOptions {
    pub host: String,
    pub port: u16,
    pub protocol_version: Option<u8>,
    pub ssl: bool,
    pub ssl_cert: Option<PathBuf>,
    pub ssl_key: Option<PathBuf>,
    pub ssl_ca: Option<PathBuf>,
    /// Milliseconds.
    pub connect_timeout: u64,
    /// Milliseconds.
    pub request_timeout: u64,
    pub consistency: ConsistencyLevel,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9042,
            protocol_version: None,
            ssl: false,
            ssl_cert: None,
            ssl_key: None,
            ssl_ca: None,
            connect_timeout: 5_000,
            request_timeout: 12_000,
            consistency: ConsistencyLevel::LocalQuorum,
        }
    }
}

impl ServerOptions {
    fn apply(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            OPT_HOST => self.host = value.to_string(),
            OPT_PORT => self.port = parse_port(value)?,
            OPT_PROTOCOL_VERSION => self.protocol_version = Some(parse_protocol_version(value)?),
            OPT_SSL => self.ssl = parse_bool(name, value)?,
            OPT_SSL_CERT => self.ssl_cert = Some(PathBuf::from(value)),
            OPT_SSL_KEY => self.ssl_key = Some(PathBuf::from(value)),
            OPT_SSL_CA => self.ssl_ca = Some(PathBuf::from(value)),
            OPT_CONNECT_TIMEOUT => self.connect_timeout = parse_millis(name, value)?,
            OPT_REQUEST_TIMEOUT => self.request_timeout = parse_millis(name, value)?,
            OPT_CONSISTENCY => self.consistency = value.parse()?,
            _ => {}
        }
        Ok(())
    }
}

/// Credentials from the user mapping.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserOptions {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for UserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserOptions")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Remote table identity and key layout of one foreign table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
    pub keyspace: Option<String>,
    pub table: Option<String>,
    /// Comma-separated partition-key column names.
    pub primary_key: Option<String>,
    /// Comma-separated clustering-key column names.
    pub clustering_key: Option<String>,
}

impl TableOptions {
    /// Remote keyspace. Required before any statement can be built.
    pub fn keyspace(&self) -> Result<&str> {
        self.keyspace
            .as_deref()
            .ok_or(ConfigError::MissingOption(OPT_KEYSPACE))
    }

    /// Remote table name.
    pub fn table(&self) -> Result<&str> {
        self.table.as_deref().ok_or(ConfigError::MissingOption(OPT_TABLE))
    }
}

/// Everything the wrapper knows about one foreign table, merged from its
/// server, user mapping and table options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FdwOptions {
    pub server: ServerOptions,
    pub user: UserOptions,
    pub table: TableOptions,
}

impl FdwOptions {
    /// Merges the three catalog option lists onto `defaults`.
    ///
    /// Later lists do not override earlier ones because every option belongs
    /// to exactly one context. Each entry is validated against its context.
    /// When the table list has no `table` entry, the local relation name is
    /// used as the remote table name.
    pub fn from_lists<K, V>(
        defaults: &ServerOptions,
        server: &[(K, V)],
        user: &[(K, V)],
        table: &[(K, V)],
        relation_name: &str,
    ) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut merged = FdwOptions {
            server: defaults.clone(),
            ..Default::default()
        };

        for (name, value) in server {
            let (name, value) = (name.as_ref(), value.as_ref());
            validate_option(name, value, OptionContext::Server)?;
            merged.server.apply(name, value)?;
        }

        for (name, value) in user {
            let (name, value) = (name.as_ref(), value.as_ref());
            validate_option(name, value, OptionContext::UserMapping)?;
            match name {
                OPT_USERNAME => merged.user.username = Some(value.to_string()),
                OPT_PASSWORD => merged.user.password = Some(value.to_string()),
                _ => {}
            }
        }

        for (name, value) in table {
            let (name, value) = (name.as_ref(), value.as_ref());
            validate_option(name, value, OptionContext::Table)?;
            let slot = match name {
                OPT_KEYSPACE => &mut merged.table.keyspace,
                OPT_TABLE => &mut merged.table.table,
                OPT_PRIMARY_KEY => &mut merged.table.primary_key,
                _ => &mut merged.table.clustering_key,
            };
            *slot = Some(value.to_string());
        }

        if merged.table.table.is_none() {
            debug!(relation = relation_name, "table option absent, using relation name");
            merged.table.table = Some(relation_name.to_string());
        }

        Ok(merged)
    }
}
