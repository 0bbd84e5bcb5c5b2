//! Configuration error types

use thiserror::Error;

use crate::options::OptionContext;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid option \"{name}\": valid options for a {context} are: {}", valid.join(", "))]
    InvalidOption {
        name: String,
        context: OptionContext,
        valid: Vec<&'static str>,
    },

    #[error("invalid option \"{name}\": option is not valid for a {context}")]
    OptionNotAllowed { name: String, context: OptionContext },

    #[error("invalid port number: {0}")]
    InvalidPort(String),

    #[error(
        "invalid consistency level: {0} (valid values are: any, one, two, three, quorum, all, \
         local_quorum, each_quorum, serial, local_serial, local_one)"
    )]
    InvalidConsistency(String),

    #[error("invalid value for option \"{name}\": {value:?} ({reason})")]
    InvalidValue {
        name: String,
        value: String,
        reason: &'static str,
    },

    #[error("missing required option \"{0}\"")]
    MissingOption(&'static str),

    #[error("{option} names column \"{column}\", which does not exist in the foreign table")]
    UnknownKeyColumn { option: &'static str, column: String },

    #[error("{operation} requires the primary_key option on the foreign table")]
    MissingKey { operation: &'static str },

    #[error("no user configuration directory: {0}")]
    NoUserConfigDir(String),
}

/// Result type for option handling.
pub type Result<T> = std::result::Result<T, ConfigError>;
