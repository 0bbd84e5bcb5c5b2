//! Host to remote conversion, for bound statement parameters.

use scylla_fdw_types::{SemanticType, Value};
use tracing::{debug, warn};

use crate::epoch;
use crate::error::{CodecError, Result};
use crate::remote::RemoteValue;

/// Encodes a host value of column type `ty` as a remote bound parameter.
///
/// This is the inverse of [`crate::decode`]: decoding the result with the
/// same `ty` yields `value` again, except for timestamps, which lose any
/// sub-millisecond part.
pub fn encode(value: &Value, ty: &SemanticType) -> Result<RemoteValue> {
    if value.is_null() {
        return Ok(RemoteValue::Null);
    }

    let remote = match ty {
        SemanticType::Boolean => {
            RemoteValue::Boolean(value.as_boolean().ok_or_else(|| mismatch(ty, value))?)
        }
        SemanticType::Int2 => {
            let v = value.as_i64().ok_or_else(|| mismatch(ty, value))?;
            RemoteValue::SmallInt(i16::try_from(v).map_err(|_| out_of_range(ty, v))?)
        }
        SemanticType::Int4 => {
            let v = value.as_i64().ok_or_else(|| mismatch(ty, value))?;
            RemoteValue::Int(i32::try_from(v).map_err(|_| out_of_range(ty, v))?)
        }
        SemanticType::Int8 => RemoteValue::BigInt(value.as_i64().ok_or_else(|| mismatch(ty, value))?),
        SemanticType::Float4 => match value {
            Value::Float4(v) => RemoteValue::Float(*v),
            _ => return Err(mismatch(ty, value)),
        },
        SemanticType::Float8 => RemoteValue::Double(value.as_f64().ok_or_else(|| mismatch(ty, value))?),
        SemanticType::Numeric => match value {
            Value::Numeric(n) => RemoteValue::Decimal {
                unscaled: n.unscaled().clone(),
                scale: i32::try_from(n.scale()).map_err(|_| out_of_range(ty, n))?,
            },
            other => {
                let v = other.as_i64().ok_or_else(|| mismatch(ty, value))?;
                RemoteValue::Decimal {
                    unscaled: v.into(),
                    scale: 0,
                }
            }
        },
        SemanticType::Text | SemanticType::Varchar | SemanticType::Bpchar => {
            RemoteValue::Text(value.as_text().ok_or_else(|| mismatch(ty, value))?.to_string())
        }
        SemanticType::Bytea => {
            RemoteValue::Blob(value.as_bytes().ok_or_else(|| mismatch(ty, value))?.clone())
        }
        SemanticType::Uuid => RemoteValue::Uuid(value.as_uuid().ok_or_else(|| mismatch(ty, value))?),
        SemanticType::Inet => RemoteValue::Inet(value.as_inet().ok_or_else(|| mismatch(ty, value))?),
        SemanticType::Timestamp | SemanticType::TimestampTz => {
            let us = value
                .as_timestamp_usecs()
                .ok_or_else(|| mismatch(ty, value))?;
            RemoteValue::Timestamp(
                epoch::unix_millis_from_host_usecs(us).ok_or_else(|| out_of_range(ty, us))?,
            )
        }
        SemanticType::Date => {
            let days = value.as_date().ok_or_else(|| mismatch(ty, value))?;
            RemoteValue::Date(
                epoch::remote_date_from_host_days(days).ok_or_else(|| out_of_range(ty, days))?,
            )
        }
        SemanticType::Time => {
            let us = value.as_time().ok_or_else(|| mismatch(ty, value))?;
            RemoteValue::Time(epoch::nanos_from_host_usecs(us).ok_or_else(|| out_of_range(ty, us))?)
        }
        SemanticType::Array(_) | SemanticType::Composite(_) | SemanticType::Other(_) => {
            encode_as_text(value, ty)
        }
    };
    Ok(remote)
}

fn encode_as_text(value: &Value, ty: &SemanticType) -> RemoteValue {
    match value {
        Value::Text(s) => {
            debug!(ty = %ty, "binding unmapped type as text");
            RemoteValue::Text(s.clone())
        }
        other => {
            warn!(ty = %ty, "binding unmapped type through its text output");
            RemoteValue::Text(other.to_string())
        }
    }
}

fn mismatch(ty: &SemanticType, value: &Value) -> CodecError {
    CodecError::TypeMismatch {
        expected: ty.to_string(),
        actual: value
            .semantic_type()
            .map_or_else(|| "null".to_string(), |t| t.to_string()),
    }
}

fn out_of_range(ty: &SemanticType, detail: impl ToString) -> CodecError {
    CodecError::OutOfRange {
        ty: ty.clone(),
        detail: detail.to_string(),
    }
}
