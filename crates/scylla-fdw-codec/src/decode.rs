//! Remote to host conversion.

use scylla_fdw_types::{Numeric, SemanticType, Value};
use tracing::warn;

use crate::epoch;
use crate::error::{CodecError, Result};
use crate::remote::RemoteValue;

/// Decodes one remote column value into a host value of type `ty`.
///
/// Remote NULL decodes to [`Value::Null`] for every type. Types without a
/// dedicated mapping are decoded from the value's raw text.
pub fn decode(remote: &RemoteValue, ty: &SemanticType) -> Result<Value> {
    if remote.is_null() {
        return Ok(Value::Null);
    }

    let value = match ty {
        SemanticType::Boolean => match remote {
            RemoteValue::Boolean(b) => Value::Boolean(*b),
            _ => return Err(mismatch(ty, remote)),
        },
        SemanticType::Int2 => {
            let v = remote_integer(remote).ok_or_else(|| mismatch(ty, remote))?;
            Value::Int2(i16::try_from(v).map_err(|_| out_of_range(ty, v))?)
        }
        SemanticType::Int4 => {
            let v = remote_integer(remote).ok_or_else(|| mismatch(ty, remote))?;
            Value::Int4(i32::try_from(v).map_err(|_| out_of_range(ty, v))?)
        }
        SemanticType::Int8 => {
            Value::Int8(remote_integer(remote).ok_or_else(|| mismatch(ty, remote))?)
        }
        SemanticType::Float4 => match remote {
            RemoteValue::Float(v) => Value::Float4(*v),
            _ => return Err(mismatch(ty, remote)),
        },
        SemanticType::Float8 => match remote {
            RemoteValue::Double(v) => Value::Float8(*v),
            RemoteValue::Float(v) => Value::Float8(f64::from(*v)),
            _ => return Err(mismatch(ty, remote)),
        },
        SemanticType::Numeric => Value::Numeric(decode_numeric(remote, ty)?),
        SemanticType::Text | SemanticType::Varchar | SemanticType::Bpchar => match remote {
            RemoteValue::Text(s) => Value::Text(s.clone()),
            _ => return Err(mismatch(ty, remote)),
        },
        SemanticType::Bytea => match remote {
            RemoteValue::Blob(b) => Value::Bytea(b.clone()),
            _ => return Err(mismatch(ty, remote)),
        },
        SemanticType::Uuid => match remote {
            RemoteValue::Uuid(u) => Value::Uuid(*u),
            _ => return Err(mismatch(ty, remote)),
        },
        SemanticType::Inet => match remote {
            RemoteValue::Inet(addr) => Value::Inet(*addr),
            _ => return Err(mismatch(ty, remote)),
        },
        SemanticType::Timestamp | SemanticType::TimestampTz => {
            let RemoteValue::Timestamp(ms) = remote else {
                return Err(mismatch(ty, remote));
            };
            let us = epoch::host_usecs_from_unix_millis(*ms).ok_or_else(|| out_of_range(ty, ms))?;
            if *ty == SemanticType::Timestamp {
                Value::Timestamp(us)
            } else {
                Value::TimestampTz(us)
            }
        }
        SemanticType::Date => {
            let RemoteValue::Date(day) = remote else {
                return Err(mismatch(ty, remote));
            };
            Value::Date(epoch::host_days_from_remote_date(*day).ok_or_else(|| out_of_range(ty, day))?)
        }
        SemanticType::Time => {
            let RemoteValue::Time(ns) = remote else {
                return Err(mismatch(ty, remote));
            };
            Value::Time(epoch::host_usecs_from_nanos(*ns).ok_or_else(|| out_of_range(ty, ns))?)
        }
        SemanticType::Array(_) | SemanticType::Composite(_) | SemanticType::Other(_) => {
            return Ok(decode_as_text(remote, ty));
        }
    };
    Ok(value)
}

fn decode_numeric(remote: &RemoteValue, ty: &SemanticType) -> Result<Numeric> {
    match remote {
        RemoteValue::Decimal { unscaled, scale } => {
            if !Numeric::scale_in_range(*scale) {
                return Err(out_of_range(ty, format!("scale {scale}")));
            }
            Ok(Numeric::from_signed_scale(unscaled.clone(), *scale))
        }
        other => remote_integer(other)
            .map(|v| Numeric::new(v, 0))
            .ok_or_else(|| mismatch(ty, remote)),
    }
}

fn decode_as_text(remote: &RemoteValue, ty: &SemanticType) -> Value {
    match remote {
        RemoteValue::Text(s) => Value::Text(s.clone()),
        other => {
            warn!(ty = %ty, remote = other.kind(), "decoding unmapped type through text");
            Value::Text(other.to_string())
        }
    }
}

fn remote_integer(remote: &RemoteValue) -> Option<i64> {
    match remote {
        RemoteValue::TinyInt(v) => Some(i64::from(*v)),
        RemoteValue::SmallInt(v) => Some(i64::from(*v)),
        RemoteValue::Int(v) => Some(i64::from(*v)),
        RemoteValue::BigInt(v) => Some(*v),
        _ => None,
    }
}

fn mismatch(ty: &SemanticType, remote: &RemoteValue) -> CodecError {
    CodecError::TypeMismatch {
        expected: ty.to_string(),
        actual: remote.kind().to_string(),
    }
}

fn out_of_range(ty: &SemanticType, detail: impl ToString) -> CodecError {
    CodecError::OutOfRange {
        ty: ty.clone(),
        detail: detail.to_string(),
    }
}
