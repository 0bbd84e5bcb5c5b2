//! Epoch constants shared by the codec and the value formatters.
//!
//! The host counts timestamps in microseconds and dates in days, both from
//! 2000-01-01. The remote store counts timestamps in milliseconds from
//! 1970-01-01 and dates as an unsigned 32-bit day number centred on 2^31.

/// Julian day number of 2000-01-01 (host epoch).
pub const HOST_EPOCH_JDATE: i64 = 2_451_545;

/// Julian day number of 1970-01-01 (Unix epoch).
pub const UNIX_EPOCH_JDATE: i64 = 2_440_588;

/// Days between the Unix epoch and the host epoch.
pub const HOST_EPOCH_OFFSET_DAYS: i64 = HOST_EPOCH_JDATE - UNIX_EPOCH_JDATE;

pub const SECS_PER_DAY: i64 = 86_400;
pub const USECS_PER_SEC: i64 = 1_000_000;
pub const USECS_PER_DAY: i64 = SECS_PER_DAY * USECS_PER_SEC;
pub const USECS_PER_MSEC: i64 = 1_000;
pub const NSECS_PER_USEC: i64 = 1_000;

/// Microseconds between the Unix epoch and the host epoch.
pub const HOST_EPOCH_OFFSET_USECS: i64 = HOST_EPOCH_OFFSET_DAYS * USECS_PER_DAY;

/// Day number the remote `date` type assigns to 1970-01-01.
pub const REMOTE_DATE_CENTER: i64 = 1 << 31;

/// Days from 0001-01-01 (day 1 in the proleptic Gregorian calendar) to the host epoch.
pub(crate) const HOST_EPOCH_DAYS_FROM_CE: i64 = 730_120;
