//! # scylla-fdw-query: predicate pushdown and CQL generation
//!
//! Turns what the host planner knows about a scan or modification into CQL.
//!
//! # Pipeline
//!
//! ```text
//! predicates ──► Classifier ──► remote ──► Deparser ──┐
//!                     │                               ├──► StatementBuilder ──► RemoteQuery
//!                     └──────► local (host filters)   │
//!          required columns, KeyDescriptor ───────────┘
//! ```
//!
//! - [`Classifier`] splits predicates into those CQL can evaluate and those
//!   the host must evaluate itself. Only AND-combinations of binary
//!   comparisons with `=`, `<`, `>`, `<=`, `>=`, `<>` and `col IN (...)` lists
//!   over mapped types qualify.
//! - [`Deparser`] renders accepted predicates; a node it cannot render fails
//!   the whole predicate rather than producing partial text.
//! - [`StatementBuilder`] assembles SELECT and the INSERT/UPDATE/DELETE
//!   templates, and decides whether the scan needs [`ALLOW_FILTERING`].
//! - [`estimate`] sizes the scan for the planner.
//!
//! # Example
//!
//! ```
//! use scylla_fdw_query::{
//!     Classifier, Expr, KeyDescriptor, OperatorId, RequiredColumns, StatementBuilder,
//!     StaticOperatorCatalog, STANDARD_NAMESPACE,
//! };
//! use scylla_fdw_types::{RelationId, SemanticType, TableDef, Value};
//!
//! let rel = RelationId(16384);
//! let table = TableDef::new(rel, "t")
//!     .column("id", SemanticType::Int4)
//!     .column("col1", SemanticType::Text)
//!     .column("col2", SemanticType::Text);
//! let catalog = StaticOperatorCatalog::new().with(OperatorId(96), "=", STANDARD_NAMESPACE);
//!
//! let conds = vec![Expr::compare(
//!     OperatorId(96),
//!     Expr::column(rel, 1, SemanticType::Int4),
//!     Expr::literal(Value::Int4(42)),
//! )];
//! let (remote, local) = Classifier::new(rel, &catalog).partition(conds);
//! assert!(local.is_empty());
//!
//! let key = KeyDescriptor::resolve(Some("id"), None, &table).unwrap();
//! let query = StatementBuilder::new(&table, "ks", "t", &catalog)
//!     .select(&RequiredColumns::only([2, 3]), &remote, &key)
//!     .unwrap();
//! assert_eq!(query.text, "SELECT col1, col2 FROM ks.t WHERE id = 42");
//! assert!(!query.allow_filtering);
//! ```

mod builder;
mod classify;
mod cost;
mod deparse;
mod error;
mod expr;
mod key;
mod operator;

#[cfg(test)]
mod tests;

pub use builder::{
    ALLOW_FILTERING, Operation, RemoteQuery, RequiredColumns, StatementBuilder,
    needs_allow_filtering,
};
pub use classify::{Classifier, Pushdown, classify, is_pushdown_safe_type};
pub use cost::{CostEstimate, CostInput, QualCost, clamp_row_est, estimate};
pub use deparse::{Deparser, quote_identifier, quote_literal};
pub use error::{QueryError, Result};
pub use expr::{BoolOp, Expr, OperatorId};
pub use key::{KeyColumn, KeyDescriptor};
pub use operator::{
    OperatorCatalog, RemoteOperator, STANDARD_NAMESPACE, StaticOperatorCatalog, resolve_operator,
};
