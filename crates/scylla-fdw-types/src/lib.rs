//! # scylla-fdw-types: host-side types for the ScyllaDB foreign data wrapper
//!
//! The host query engine and the remote store disagree on almost every
//! representation detail: epochs, integer widths, decimal encoding. This crate
//! pins down the *host* side of that boundary:
//!
//! - [`SemanticType`]: the host column types the wrapper understands
//! - [`Value`]: a decoded host value (one per row per column)
//! - [`Numeric`]: arbitrary-precision decimal (unscaled integer + scale)
//! - [`TableDef`] / [`ColumnDef`]: the local relation descriptor
//! - [`epoch`]: the fixed offsets between the Unix and host epochs
//!
//! The remote side lives in `scylla-fdw-codec`.

pub mod epoch;
mod numeric;
mod relation;
mod semantic;
mod value;

pub use numeric::{NUMERIC_MAX_SCALE, NUMERIC_MAX_WEIGHT, Numeric, NumericParseError};
pub use relation::{AttrNumber, ColumnDef, ColumnName, RelationId, TableDef, TableName};
pub use semantic::SemanticType;
pub use value::Value;
