//! Errors surfaced to the host.

use scylla_fdw_codec::CodecError;
use scylla_fdw_config::ConfigError;
use scylla_fdw_query::{Operation, QueryError};
use thiserror::Error;

use crate::transport::TransportError;

/// Every failure a scan or modification can report.
///
/// Configuration and translation errors are raised before anything is sent
/// to the remote store. Remote errors carry the store's message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FdwError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Query(#[from] QueryError),

    /// The remote store rejected or failed a statement.
    #[error("{operation} failed: {message}")]
    Remote { operation: Operation, message: String },

    /// The remote store refused to prepare a statement.
    #[error("could not prepare statement: {0}")]
    Prepare(String),

    /// A row does not have the number of values the statement needs.
    #[error("row has {actual} values, expected {expected}")]
    RowShape { expected: usize, actual: usize },
}

impl FdwError {
    pub(crate) fn remote(operation: Operation, err: TransportError) -> Self {
        FdwError::Remote {
            operation,
            message: err.message,
        }
    }
}

/// Result type for wrapper operations.
pub type Result<T> = std::result::Result<T, FdwError>;
