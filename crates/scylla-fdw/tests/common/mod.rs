//! Shared fixtures for the integration tests.

#![allow(dead_code)] // Not every test file uses every fixture

use std::collections::VecDeque;

use scylla_fdw::{
    ConsistencyLevel, FdwOptions, OperatorId, RelationId, RemoteValue, Row, STANDARD_NAMESPACE,
    SemanticType, ServerOptions, StaticOperatorCatalog, TableDef, Transport, TransportError,
};

// ============================================================================
// Mock Transport
// ============================================================================

/// In-memory transport that records every call.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Rows returned by every `execute`.
    pub rows: Vec<Result<Row, TransportError>>,
    /// Makes the next `execute` fail with this message.
    pub fail_execute: Option<String>,
    pub fail_prepare: Option<String>,
    /// Makes `execute_prepared` fail with these messages, in order.
    pub fail_writes: VecDeque<String>,

    pub executed: Vec<(String, ConsistencyLevel)>,
    pub prepared: Vec<String>,
    pub writes: Vec<(usize, Vec<RemoteValue>, ConsistencyLevel)>,
}

impl MockTransport {
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows: rows.into_iter().map(Ok).collect(),
            ..Self::default()
        }
    }
}

impl Transport for MockTransport {
    type Prepared = usize;
    type Rows = std::vec::IntoIter<Result<Row, TransportError>>;

    fn execute(
        &mut self,
        query: &str,
        consistency: ConsistencyLevel,
    ) -> Result<Self::Rows, TransportError> {
        self.executed.push((query.to_string(), consistency));
        if let Some(message) = self.fail_execute.take() {
            return Err(TransportError::new(message));
        }
        Ok(self.rows.clone().into_iter())
    }

    fn prepare(&mut self, query: &str) -> Result<usize, TransportError> {
        if let Some(message) = self.fail_prepare.take() {
            return Err(TransportError::new(message));
        }
        self.prepared.push(query.to_string());
        Ok(self.prepared.len() - 1)
    }

    fn execute_prepared(
        &mut self,
        prepared: &usize,
        params: &[RemoteValue],
        consistency: ConsistencyLevel,
    ) -> Result<(), TransportError> {
        if let Some(message) = self.fail_writes.pop_front() {
            return Err(TransportError::new(message));
        }
        self.writes.push((*prepared, params.to_vec(), consistency));
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub const REL: RelationId = RelationId(16384);
pub const OP_EQ: OperatorId = OperatorId(96);
pub const OP_GT: OperatorId = OperatorId(521);

pub fn catalog() -> StaticOperatorCatalog {
    StaticOperatorCatalog::new()
        .with(OP_EQ, "=", STANDARD_NAMESPACE)
        .with(OP_GT, ">", STANDARD_NAMESPACE)
}

/// `t (id int4, col1 text, col2 text, seen timestamp)`
pub fn table_t() -> TableDef {
    TableDef::new(REL, "t")
        .column("id", SemanticType::Int4)
        .column("col1", SemanticType::Text)
        .column("col2", SemanticType::Text)
        .column("seen", SemanticType::Timestamp)
}

/// Options for `table_t` with the given table options on top of
/// `keyspace = ks`.
pub fn options(table: &[(&str, &str)]) -> FdwOptions {
    options_with_server(&[], table)
}

pub fn options_with_server(server: &[(&str, &str)], table: &[(&str, &str)]) -> FdwOptions {
    let mut list = vec![("keyspace", "ks")];
    list.extend_from_slice(table);
    FdwOptions::from_lists(&ServerOptions::default(), server, &[], list.as_slice(), "t").unwrap()
}
