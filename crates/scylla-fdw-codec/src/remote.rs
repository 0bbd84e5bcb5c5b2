//! Remote (CQL) value model.

use std::fmt::{self, Display};
use std::net::IpAddr;

use bytes::Bytes;
use num_bigint::BigInt;

/// A single column value as the transport hands it over, or as it is bound
/// to a prepared statement.
///
/// Each variant carries the CQL wire meaning of its payload: timestamps are
/// milliseconds since 1970-01-01, dates are day numbers centred on 2^31, and
/// times are nanoseconds since midnight.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteValue {
    Null,
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Float(f32),
    Double(f64),
    /// Arbitrary-precision decimal: `unscaled * 10^-scale`. The scale may be negative.
    Decimal { unscaled: BigInt, scale: i32 },
    /// `text`, `varchar` and `ascii`.
    Text(String),
    Blob(Bytes),
    /// `uuid` and `timeuuid`.
    Uuid(uuid::Uuid),
    Inet(IpAddr),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    /// Days since the Unix epoch, offset by 2^31.
    Date(u32),
    /// Nanoseconds since midnight.
    Time(i64),
}

impl RemoteValue {
    /// CQL type name of this value, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteValue::Null => "null",
            RemoteValue::Boolean(_) => "boolean",
            RemoteValue::TinyInt(_) => "tinyint",
            RemoteValue::SmallInt(_) => "smallint",
            RemoteValue::Int(_) => "int",
            RemoteValue::BigInt(_) => "bigint",
            RemoteValue::Float(_) => "float",
            RemoteValue::Double(_) => "double",
            RemoteValue::Decimal { .. } => "decimal",
            RemoteValue::Text(_) => "text",
            RemoteValue::Blob(_) => "blob",
            RemoteValue::Uuid(_) => "uuid",
            RemoteValue::Inet(_) => "inet",
            RemoteValue::Timestamp(_) => "timestamp",
            RemoteValue::Date(_) => "date",
            RemoteValue::Time(_) => "time",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RemoteValue::Null)
    }
}

impl Display for RemoteValue {
    /// Raw textual form, used when a value has to travel as text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteValue::Null => write!(f, "null"),
            RemoteValue::Boolean(b) => write!(f, "{b}"),
            RemoteValue::TinyInt(v) => write!(f, "{v}"),
            RemoteValue::SmallInt(v) => write!(f, "{v}"),
            RemoteValue::Int(v) => write!(f, "{v}"),
            RemoteValue::BigInt(v) | RemoteValue::Timestamp(v) | RemoteValue::Time(v) => {
                write!(f, "{v}")
            }
            RemoteValue::Float(v) => write!(f, "{v}"),
            RemoteValue::Double(v) => write!(f, "{v}"),
            RemoteValue::Decimal { unscaled, scale } => write!(f, "{unscaled}E{}", -i64::from(*scale)),
            RemoteValue::Text(s) => write!(f, "{s}"),
            RemoteValue::Blob(b) => {
                write!(f, "0x")?;
                for byte in b.iter() {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            RemoteValue::Uuid(u) => write!(f, "{}", u.hyphenated()),
            RemoteValue::Inet(addr) => write!(f, "{addr}"),
            RemoteValue::Date(d) => write!(f, "{d}"),
        }
    }
}
