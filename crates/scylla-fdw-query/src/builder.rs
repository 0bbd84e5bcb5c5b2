//! CQL statement construction.
//!
//! SELECT statements carry literal predicates in their WHERE clause;
//! INSERT/UPDATE/DELETE statements are templates with `?` placeholders, bound
//! per row in the order recorded in [`RemoteQuery::attrs`].

use std::collections::BTreeSet;
use std::fmt::{self, Display};

use scylla_fdw_config::ConfigError;
use scylla_fdw_types::{AttrNumber, RelationId, TableDef};
use tracing::{debug, warn};

use crate::deparse::{Deparser, quote_identifier};
use crate::error::{QueryError, Result};
use crate::expr::Expr;
use crate::key::KeyDescriptor;
use crate::operator::{OperatorCatalog, RemoteOperator, resolve_operator};

/// Suffix that lets the remote store run a filtered scan.
pub const ALLOW_FILTERING: &str = "ALLOW FILTERING";

// ============================================================================
// Descriptors
// ============================================================================

/// Columns the host needs from a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredColumns {
    /// Every live column, e.g. for a whole-row reference.
    All,
    /// Only these attributes. May be empty for existence checks.
    Only(BTreeSet<AttrNumber>),
}

impl RequiredColumns {
    pub fn only(attnums: impl IntoIterator<Item = AttrNumber>) -> Self {
        RequiredColumns::Only(attnums.into_iter().collect())
    }
}

/// Kind of remote statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Select => "SELECT",
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated remote statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteQuery {
    pub text: String,
    /// For SELECT, the attribute behind each result column. For modify
    /// statements, the attribute bound to each placeholder.
    pub attrs: Vec<AttrNumber>,
    pub operation: Operation,
    /// Whether [`ALLOW_FILTERING`] was appended.
    pub allow_filtering: bool,
}

// ============================================================================
// Completeness Analysis
// ============================================================================

/// Decides whether a scan with `conditions` must carry [`ALLOW_FILTERING`].
///
/// The marker can be left out only when every partition-key column is pinned
/// by a top-level `col = literal` or `col IN (...)` predicate. With no
/// predicates, or no configured partition key, it is always required.
pub fn needs_allow_filtering(
    conditions: &[Expr],
    key: &KeyDescriptor,
    relation: RelationId,
    catalog: &dyn OperatorCatalog,
) -> bool {
    if conditions.is_empty() || !key.is_configured() {
        return true;
    }

    key.partition_key().iter().any(|column| {
        !conditions
            .iter()
            .any(|cond| pins_column(cond, relation, column.attnum, catalog))
    })
}

fn pins_column(
    cond: &Expr,
    relation: RelationId,
    attnum: AttrNumber,
    catalog: &dyn OperatorCatalog,
) -> bool {
    let is_eq = |op| resolve_operator(catalog, op) == Some(RemoteOperator::Eq);
    match cond {
        Expr::Comparison { op, args } => {
            args.len() == 2 && is_eq(*op) && args[0].as_column() == Some((relation, attnum))
        }
        Expr::SetMembership {
            op, use_or, left, ..
        } => *use_or && is_eq(*op) && left.as_column() == Some((relation, attnum)),
        _ => false,
    }
}

// ============================================================================
// Statement Builder
// ============================================================================

/// Builds statements against one remote table.
pub struct StatementBuilder<'a> {
    table: &'a TableDef,
    keyspace: &'a str,
    remote_table: &'a str,
    catalog: &'a dyn OperatorCatalog,
}

impl<'a> StatementBuilder<'a> {
    pub fn new(
        table: &'a TableDef,
        keyspace: &'a str,
        remote_table: &'a str,
        catalog: &'a dyn OperatorCatalog,
    ) -> Self {
        Self {
            table,
            keyspace,
            remote_table,
            catalog,
        }
    }

    /// `keyspace.table`, each part quoted as needed.
    pub fn qualified_name(&self) -> String {
        format!(
            "{}.{}",
            quote_identifier(self.keyspace),
            quote_identifier(self.remote_table)
        )
    }

    /// Builds the scan statement.
    ///
    /// `conditions` must be predicates the classifier accepted; one that
    /// fails to render aborts the whole statement.
    pub fn select(
        &self,
        required: &RequiredColumns,
        conditions: &[Expr],
        key: &KeyDescriptor,
    ) -> Result<RemoteQuery> {
        let mut attrs: Vec<AttrNumber> = match required {
            RequiredColumns::All => self.table.live_columns().map(|c| c.attnum).collect(),
            RequiredColumns::Only(set) => self
                .table
                .live_columns()
                .map(|c| c.attnum)
                .filter(|attnum| set.contains(attnum))
                .collect(),
        };

        if attrs.is_empty() {
            let first = self
                .table
                .live_columns()
                .next()
                .ok_or_else(|| QueryError::NoColumns(self.table.name.to_string()))?;
            warn!(
                table = %self.table.name,
                column = %first.name,
                "no columns requested, selecting first live column"
            );
            attrs.push(first.attnum);
        }

        let columns = self.column_list(&attrs)?;
        let mut text = format!("SELECT {columns} FROM {}", self.qualified_name());

        let deparser = Deparser::new(self.table, self.catalog);
        if let Some(clause) = deparser.where_clause(conditions)? {
            text.push_str(" WHERE ");
            text.push_str(&clause);
        }

        let allow_filtering =
            needs_allow_filtering(conditions, key, self.table.relation, self.catalog);
        if allow_filtering {
            text.push(' ');
            text.push_str(ALLOW_FILTERING);
        }

        debug!(table = %self.table.name, query = %text, allow_filtering, "built scan statement");
        Ok(RemoteQuery {
            text,
            attrs,
            operation: Operation::Select,
            allow_filtering,
        })
    }

    /// Builds `INSERT INTO ks.t (cols) VALUES (?, ...)` over `targets`.
    pub fn insert(&self, targets: &[AttrNumber]) -> Result<RemoteQuery> {
        if targets.is_empty() {
            return Err(QueryError::NoColumns(self.table.name.to_string()));
        }
        let columns = self.column_list(targets)?;
        let placeholders = vec!["?"; targets.len()].join(", ");
        let text = format!(
            "INSERT INTO {} ({columns}) VALUES ({placeholders})",
            self.qualified_name()
        );
        Ok(self.modify(text, targets.to_vec(), Operation::Insert))
    }

    /// Builds `UPDATE ks.t SET c = ?, ... WHERE k = ? AND ...`.
    ///
    /// Key columns among `targets` are dropped from the SET list. Binding
    /// order is the SET columns, then the primary key columns.
    pub fn update(&self, targets: &[AttrNumber], key: &KeyDescriptor) -> Result<RemoteQuery> {
        require_key(key, Operation::Update)?;

        let set_attrs: Vec<AttrNumber> = targets
            .iter()
            .copied()
            .filter(|attnum| !key.contains(*attnum))
            .collect();
        if set_attrs.is_empty() {
            return Err(QueryError::EmptyUpdate(self.table.name.to_string()));
        }

        let assignments = set_attrs
            .iter()
            .map(|attnum| -> Result<String> { Ok(format!("{} = ?", self.column_name(*attnum)?)) })
            .collect::<Result<Vec<_>>>()?
            .join(", ");
        let text = format!(
            "UPDATE {} SET {assignments} WHERE {}",
            self.qualified_name(),
            key_clause(key)
        );

        let mut attrs = set_attrs;
        attrs.extend(key.primary_key().map(|k| k.attnum));
        Ok(self.modify(text, attrs, Operation::Update))
    }

    /// Builds `DELETE FROM ks.t WHERE k = ? AND ...`.
    pub fn delete(&self, key: &KeyDescriptor) -> Result<RemoteQuery> {
        require_key(key, Operation::Delete)?;
        let text = format!(
            "DELETE FROM {} WHERE {}",
            self.qualified_name(),
            key_clause(key)
        );
        let attrs = key.primary_key().map(|k| k.attnum).collect();
        Ok(self.modify(text, attrs, Operation::Delete))
    }

    fn modify(&self, text: String, attrs: Vec<AttrNumber>, operation: Operation) -> RemoteQuery {
        debug!(table = %self.table.name, query = %text, %operation, "built modify statement");
        RemoteQuery {
            text,
            attrs,
            operation,
            allow_filtering: false,
        }
    }

    fn column_list(&self, attrs: &[AttrNumber]) -> Result<String> {
        Ok(attrs
            .iter()
            .map(|attnum| self.column_name(*attnum))
            .collect::<Result<Vec<_>>>()?
            .join(", "))
    }

    fn column_name(&self, attnum: AttrNumber) -> Result<String> {
        self.table
            .attribute(attnum)
            .filter(|c| !c.dropped)
            .map(|c| quote_identifier(c.name.as_str()))
            .ok_or_else(|| QueryError::UnknownColumn {
                table: self.table.name.to_string(),
                attnum,
            })
    }
}

fn require_key(key: &KeyDescriptor, operation: Operation) -> Result<()> {
    if key.is_configured() {
        Ok(())
    } else {
        Err(ConfigError::MissingKey {
            operation: operation.as_str(),
        }
        .into())
    }
}

fn key_clause(key: &KeyDescriptor) -> String {
    key.primary_key()
        .map(|k| format!("{} = ?", quote_identifier(k.name.as_str())))
        .collect::<Vec<_>>()
        .join(" AND ")
}
