//! Query translation errors.

use scylla_fdw_codec::CodecError;
use scylla_fdw_config::ConfigError;
use scylla_fdw_types::AttrNumber;
use thiserror::Error;

/// Errors raised while turning a plan into remote statements.
///
/// A predicate that cannot be pushed down is not an error; it simply stays
/// local. These variants cover the cases where no correct statement exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Missing or invalid table configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A value could not be converted for the remote store.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The deparser met a construct the classifier should have rejected.
    #[error("internal error while deparsing: {0}")]
    Internal(String),

    /// Every column of the relation is dropped, so no projection exists.
    #[error("foreign table \"{0}\" has no columns to select")]
    NoColumns(String),

    /// An UPDATE with nothing left to SET once key columns are removed.
    #[error("UPDATE on \"{0}\" has no non-key columns to set")]
    EmptyUpdate(String),

    /// An attribute number that is absent or dropped in the relation.
    #[error("attribute {attnum} does not exist in \"{table}\"")]
    UnknownColumn { table: String, attnum: AttrNumber },
}

/// Result type for query translation.
pub type Result<T> = std::result::Result<T, QueryError>;
