//! Configuration management for the ScyllaDB foreign data wrapper
//!
//! Two kinds of configuration meet here:
//!
//! - catalog options attached to a foreign server, user mapping or foreign
//!   table, validated by [`validate_option`] and merged by
//!   [`FdwOptions::from_lists`]
//! - wrapper-wide defaults loaded hierarchically by [`ConfigLoader`]:
//!   built-in defaults, then each [`ConfigLayer`] file, then `SCYLLA_FDW_*`
//!   environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod consistency;
mod error;
mod loader;
mod options;

pub use consistency::ConsistencyLevel;
pub use error::ConfigError;
pub use loader::{ConfigLayer, ConfigLoader, user_config_dir};
pub use options::{
    FdwOptions, OPT_CLUSTERING_KEY, OPT_CONNECT_TIMEOUT, OPT_CONSISTENCY, OPT_HOST,
    OPT_KEYSPACE, OPT_PASSWORD, OPT_PORT, OPT_PRIMARY_KEY, OPT_PROTOCOL_VERSION,
    OPT_REQUEST_TIMEOUT, OPT_SSL, OPT_SSL_CA, OPT_SSL_CERT, OPT_SSL_KEY, OPT_TABLE,
    OPT_USERNAME, OptionContext, ServerOptions, TableOptions, UserOptions, validate_option,
    validate_options,
};

/// Wrapper-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScyllaFdwConfig {
    /// Defaults for every foreign server; catalog options override them.
    pub server: ServerOptions,
    pub cost: CostConfig,
}

/// Planner cost constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Fixed cost of starting a remote query.
    pub startup_cost: f64,
    /// Cost of moving one row from the remote store.
    pub fdw_tuple_cost: f64,
    /// Host cost of processing one row.
    pub cpu_tuple_cost: f64,
    /// Host cost of evaluating one operator.
    pub cpu_operator_cost: f64,
    /// Row count assumed when the host has no statistics.
    pub default_rows: f64,
    /// Row width in bytes assumed when the host has no statistics.
    pub default_width: u32,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            startup_cost: 100.0,
            fdw_tuple_cost: 0.01,
            cpu_tuple_cost: 0.01,
            cpu_operator_cost: 0.0025,
            default_rows: 1000.0,
            default_width: 100,
        }
    }
}

impl ScyllaFdwConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Render as TOML, e.g. to seed a scylla_fdw.toml
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
