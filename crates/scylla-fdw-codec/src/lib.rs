//! # scylla-fdw-codec: value conversion between the host and ScyllaDB
//!
//! Two directions, one set of rules:
//!
//! - [`decode`]: a [`RemoteValue`] read from a result row plus the local
//!   column's [`SemanticType`] gives a host [`Value`]
//! - [`encode`]: a host [`Value`] plus the column type gives the
//!   [`RemoteValue`] bound to a prepared statement
//! - [`cql_literal`]: a host [`Value`] rendered as CQL text, for constants in
//!   pushed-down predicates
//!
//! The interesting arithmetic is in the date/time types. The remote store
//! counts timestamps in milliseconds from 1970 and dates as a 2^31-centred
//! day number; the host counts microseconds and days from 2000. See
//! [`epoch`] for the conversions.
//!
//! Types with no dedicated mapping travel as text in both directions.
//!
//! [`Value`]: scylla_fdw_types::Value
//! [`SemanticType`]: scylla_fdw_types::SemanticType

mod decode;
mod encode;
pub mod epoch;
mod error;
mod literal;
mod remote;


pub use decode::decode;
pub use encode::encode;
pub use error::{CodecError, Result};
pub use literal::{cql_literal, is_renderable, quote_literal};
pub use remote::RemoteValue;
