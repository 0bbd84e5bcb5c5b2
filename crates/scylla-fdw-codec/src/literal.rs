//! CQL literal rendering for pushed-down constants.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveTime};
use scylla_fdw_types::epoch::{NSECS_PER_USEC, USECS_PER_MSEC, USECS_PER_SEC};
use scylla_fdw_types::{SemanticType, Value};

use crate::epoch;
use crate::error::{CodecError, Result};

/// Days from 0001-01-01 to 1970-01-01 in the proleptic Gregorian calendar.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Wraps `s` in single quotes, doubling any embedded single quote.
pub fn quote_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Renders a host value as a CQL literal.
///
/// Numbers, booleans and UUIDs are bare; strings, addresses and date/time
/// values are single-quoted; blobs are `0x` followed by hex digits; NULL is
/// the bare keyword. Fails only when the value has no exact CQL spelling,
/// such as a timestamp with sub-millisecond precision.
pub fn cql_literal(value: &Value) -> Result<String> {
    let text = match value {
        Value::Null => "NULL".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Int2(_)
        | Value::Int4(_)
        | Value::Int8(_)
        | Value::Float4(_)
        | Value::Float8(_)
        | Value::Numeric(_) => value.to_string(),
        Value::Text(s) => quote_literal(s),
        Value::Bytea(bytes) => {
            let mut out = String::with_capacity(2 + bytes.len() * 2);
            out.push_str("0x");
            for byte in bytes.iter() {
                let _ = write!(out, "{byte:02x}");
            }
            out
        }
        Value::Uuid(u) => u.hyphenated().to_string(),
        Value::Inet(addr) => quote_literal(&addr.to_string()),
        Value::Timestamp(us) => quote_literal(&timestamp_text(*us, &SemanticType::Timestamp)?),
        Value::TimestampTz(us) => quote_literal(&timestamp_text(*us, &SemanticType::TimestampTz)?),
        Value::Date(days) => quote_literal(&date_text(*days)?),
        Value::Time(us) => quote_literal(&time_text(*us)?),
    };
    Ok(text)
}

/// Returns true if [`cql_literal`] can render `value`.
pub fn is_renderable(value: &Value) -> bool {
    cql_literal(value).is_ok()
}

fn timestamp_text(us: i64, ty: &SemanticType) -> Result<String> {
    let unrepresentable = |reason: &str| CodecError::Unrepresentable {
        ty: ty.clone(),
        reason: reason.to_string(),
    };
    if us.rem_euclid(USECS_PER_MSEC) != 0 {
        return Err(unrepresentable("sub-millisecond precision"));
    }
    let ms = epoch::unix_millis_from_host_usecs(us)
        .ok_or_else(|| unrepresentable("outside the remote timestamp range"))?;
    let dt = DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| unrepresentable("outside the calendar range"))?;
    Ok(dt.format("%Y-%m-%d %H:%M:%S%.3f+0000").to_string())
}

fn date_text(days: i32) -> Result<String> {
    let remote = epoch::remote_date_from_host_days(days).ok_or_else(|| CodecError::Unrepresentable {
        ty: SemanticType::Date,
        reason: "outside the remote date range".to_string(),
    })?;
    let unix_days = i64::from(remote) - scylla_fdw_types::epoch::REMOTE_DATE_CENTER;
    let calendar = i32::try_from(unix_days + UNIX_EPOCH_DAYS_FROM_CE)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt);
    // CQL also accepts the raw centred day number for dates chrono cannot print.
    Ok(calendar.map_or_else(|| remote.to_string(), |d| d.format("%Y-%m-%d").to_string()))
}

fn time_text(us: i64) -> Result<String> {
    let unrepresentable = || CodecError::Unrepresentable {
        ty: SemanticType::Time,
        reason: format!("{us} microseconds is not a time of day"),
    };
    let secs = u32::try_from(us.div_euclid(USECS_PER_SEC)).map_err(|_| unrepresentable())?;
    let nanos = u32::try_from(us.rem_euclid(USECS_PER_SEC) * NSECS_PER_USEC)
        .map_err(|_| unrepresentable())?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos).ok_or_else(unrepresentable)?;
    Ok(time.format("%H:%M:%S%.f").to_string())
}
