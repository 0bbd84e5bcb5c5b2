//! # scylla-fdw
//!
//! Core of a foreign data wrapper that exposes ScyllaDB tables to a
//! relational host.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                            scylla-fdw                          │
//! │  ┌───────────┐   ┌─────────────┐   ┌────────────┐   ┌────────┐ │
//! │  │  Config   │ → │    Query    │ → │  Sessions  │ → │ Codec  │ │
//! │  │ (options) │   │ (pushdown,  │   │ (scan,     │   │(values)│ │
//! │  │           │   │  CQL text)  │   │  modify)   │   │        │ │
//! │  └───────────┘   └─────────────┘   └────────────┘   └────────┘ │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host calls [`plan_scan`] or [`plan_modify`] at planning time and
//! keeps the returned plan. At execution time it opens a [`ScanSession`] or
//! [`ModifySession`] over a [`Transport`], which is the only part that talks
//! to the remote store.
//!
//! # Modules
//!
//! - **Planning**: [`plan_scan`], [`plan_modify`], [`ScanPlan`], [`ModifyPlan`]
//! - **Execution**: [`ScanSession`], [`ModifySession`], [`Transport`]
//! - **Re-exports**: configuration, query and codec types the host needs

mod error;
mod modify;
mod plan;
mod scan;
mod transport;

pub use error::{FdwError, Result};
pub use modify::ModifySession;
pub use plan::{ModifyPlan, RelationStats, ScanPlan, ScanRequest, plan_modify, plan_scan};
pub use scan::ScanSession;
pub use transport::{Row, Transport, TransportError};

pub use scylla_fdw_codec::{CodecError, RemoteValue};
pub use scylla_fdw_config::{
    ConfigError, ConsistencyLevel, CostConfig, FdwOptions, OptionContext, ScyllaFdwConfig,
    ServerOptions, validate_option,
};
pub use scylla_fdw_query::{
    BoolOp, CostEstimate, Expr, Operation, OperatorCatalog, OperatorId, QualCost, QueryError,
    RequiredColumns, STANDARD_NAMESPACE, StaticOperatorCatalog,
};
pub use scylla_fdw_types::{
    AttrNumber, ColumnDef, Numeric, RelationId, SemanticType, TableDef, Value,
};
