//! Decoded host values.

#![allow(clippy::match_same_arms)]

use std::fmt::{self, Display};
use std::net::IpAddr;

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::epoch::{HOST_EPOCH_DAYS_FROM_CE, HOST_EPOCH_OFFSET_USECS, USECS_PER_SEC};
use crate::numeric::Numeric;
use crate::semantic::SemanticType;

/// A host value, as produced by the codec for one column of one row.
///
/// Date/time variants carry the host's own counts (microseconds or days since
/// 2000-01-01); converting from the remote epochs is the codec's job.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// SQL NULL.
    #[default]
    Null,

    // ===== Boolean =====
    Boolean(bool),

    // ===== Integer Types =====
    Int2(i16),
    Int4(i32),
    Int8(i64),

    // ===== Floating Point / Decimal =====
    Float4(f32),
    Float8(f64),
    Numeric(Numeric),

    // ===== String / Binary =====
    /// Any member of the string family (`text`, `varchar`, `bpchar`).
    Text(String),
    Bytea(Bytes),

    // ===== Structured =====
    Uuid(uuid::Uuid),
    Inet(IpAddr),

    // ===== Date/Time Types =====
    /// Microseconds since 2000-01-01.
    Timestamp(i64),
    /// Microseconds since 2000-01-01 UTC.
    TimestampTz(i64),
    /// Days since 2000-01-01.
    Date(i32),
    /// Microseconds since midnight.
    Time(i64),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int2(a), Value::Int2(b)) => a == b,
            (Value::Int4(a), Value::Int4(b)) => a == b,
            (Value::Int8(a), Value::Int8(b)) => a == b,
            // Bitwise so that NaN compares equal to itself.
            (Value::Float4(a), Value::Float4(b)) => a.to_bits() == b.to_bits(),
            (Value::Float8(a), Value::Float8(b)) => a.to_bits() == b.to_bits(),
            (Value::Numeric(a), Value::Numeric(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bytea(a), Value::Bytea(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::Inet(a), Value::Inet(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::TimestampTz(a), Value::TimestampTz(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// Returns the natural semantic type of this value.
    ///
    /// Returns `None` for `Null`. Text values report `text` even when they
    /// came from a `varchar` or `bpchar` column.
    pub fn semantic_type(&self) -> Option<SemanticType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(SemanticType::Boolean),
            Value::Int2(_) => Some(SemanticType::Int2),
            Value::Int4(_) => Some(SemanticType::Int4),
            Value::Int8(_) => Some(SemanticType::Int8),
            Value::Float4(_) => Some(SemanticType::Float4),
            Value::Float8(_) => Some(SemanticType::Float8),
            Value::Numeric(_) => Some(SemanticType::Numeric),
            Value::Text(_) => Some(SemanticType::Text),
            Value::Bytea(_) => Some(SemanticType::Bytea),
            Value::Uuid(_) => Some(SemanticType::Uuid),
            Value::Inet(_) => Some(SemanticType::Inet),
            Value::Timestamp(_) => Some(SemanticType::Timestamp),
            Value::TimestampTz(_) => Some(SemanticType::TimestampTz),
            Value::Date(_) => Some(SemanticType::Date),
            Value::Time(_) => Some(SemanticType::Time),
        }
    }

    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value widened to i64, for any integer variant.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int2(v) => Some(i64::from(*v)),
            Value::Int4(v) => Some(i64::from(*v)),
            Value::Int8(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value widened to f64, for either float variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float4(v) => Some(f64::from(*v)),
            Value::Float8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<&Numeric> {
        match self {
            Value::Numeric(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytea(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<uuid::Uuid> {
        match self {
            Value::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_inet(&self) -> Option<IpAddr> {
        match self {
            Value::Inet(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Returns host microseconds for either timestamp variant.
    pub fn as_timestamp_usecs(&self) -> Option<i64> {
        match self {
            Value::Timestamp(us) | Value::TimestampTz(us) => Some(*us),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<i32> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<i64> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }
}

// ============================================================================
// Host text output
// ============================================================================

fn write_non_finite(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        write!(f, "NaN")
    } else if v > 0.0 {
        write!(f, "Infinity")
    } else {
        write!(f, "-Infinity")
    }
}

fn write_timestamp(f: &mut fmt::Formatter<'_>, host_usecs: i64, zone: &str) -> fmt::Result {
    let unix_usecs = host_usecs.checked_add(HOST_EPOCH_OFFSET_USECS);
    let formatted = unix_usecs.and_then(|us| {
        let secs = us.div_euclid(USECS_PER_SEC);
        let nanos = u32::try_from(us.rem_euclid(USECS_PER_SEC) * 1_000).ok()?;
        DateTime::from_timestamp(secs, nanos)
    });
    match formatted {
        Some(dt) => write!(f, "{}{zone}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
        None => write!(f, "{host_usecs}"),
    }
}

impl Display for Value {
    /// Formats the value the way the host prints it in text output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Int2(v) => write!(f, "{v}"),
            Value::Int4(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Float4(v) if v.is_finite() => write!(f, "{v}"),
            Value::Float8(v) if v.is_finite() => write!(f, "{v}"),
            Value::Float4(v) => write_non_finite(f, f64::from(*v)),
            Value::Float8(v) => write_non_finite(f, *v),
            Value::Numeric(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Bytea(b) => {
                write!(f, "\\x")?;
                for byte in b.iter() {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Value::Uuid(u) => write!(f, "{}", u.hyphenated()),
            Value::Inet(addr) => write!(f, "{addr}"),
            Value::Timestamp(us) => write_timestamp(f, *us, ""),
            Value::TimestampTz(us) => write_timestamp(f, *us, "+00"),
            Value::Date(days) => {
                let date = i32::try_from(i64::from(*days) + HOST_EPOCH_DAYS_FROM_CE)
                    .ok()
                    .and_then(NaiveDate::from_num_days_from_ce_opt);
                match date {
                    Some(d) => write!(f, "{d}"),
                    None => write!(f, "{days}"),
                }
            }
            Value::Time(us) => {
                let secs = u32::try_from(us.div_euclid(USECS_PER_SEC)).ok();
                let nanos = u32::try_from(us.rem_euclid(USECS_PER_SEC) * 1_000).ok();
                let time = secs
                    .zip(nanos)
                    .and_then(|(s, n)| NaiveTime::from_num_seconds_from_midnight_opt(s, n));
                match time {
                    Some(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
                    None => write!(f, "{us}"),
                }
            }
        }
    }
}
