//! Transport trait.
//!
//! The [`Transport`] trait abstracts the connection to the remote store so
//! sessions can run against a real driver or an in-memory mock. Calls are
//! blocking and a session issues one at a time.

use scylla_fdw_codec::RemoteValue;
use scylla_fdw_config::ConsistencyLevel;
use thiserror::Error;

/// One result row, one value per selected column.
pub type Row = Vec<RemoteValue>;

/// Failure reported by the transport, carrying the remote message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Connection to the remote store.
pub trait Transport {
    /// Handle to a statement prepared on the remote side.
    type Prepared;

    /// Single-pass row cursor. Paging failures surface as `Err` items.
    type Rows: Iterator<Item = Result<Row, TransportError>>;

    /// Executes a query with literal predicates.
    fn execute(
        &mut self,
        query: &str,
        consistency: ConsistencyLevel,
    ) -> Result<Self::Rows, TransportError>;

    /// Prepares a statement with `?` placeholders.
    fn prepare(&mut self, query: &str) -> Result<Self::Prepared, TransportError>;

    /// Executes a prepared statement.
    ///
    /// # Arguments
    ///
    /// * `prepared` - Handle returned by [`Transport::prepare`]
    /// * `params` - One value per placeholder, in placeholder order
    /// * `consistency` - Replica acknowledgement policy for this call
    fn execute_prepared(
        &mut self,
        prepared: &Self::Prepared,
        params: &[RemoteValue],
        consistency: ConsistencyLevel,
    ) -> Result<(), TransportError>;
}
