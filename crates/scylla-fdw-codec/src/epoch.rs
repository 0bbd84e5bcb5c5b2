//! Epoch arithmetic between remote and host date/time counts.
//!
//! Every function returns `None` when the result does not fit the target
//! representation; callers turn that into `CodecError::OutOfRange`.

use scylla_fdw_types::epoch::{
    HOST_EPOCH_OFFSET_DAYS, HOST_EPOCH_OFFSET_USECS, NSECS_PER_USEC, REMOTE_DATE_CENTER,
    USECS_PER_DAY, USECS_PER_MSEC,
};

/// Remote milliseconds since 1970 to host microseconds since 2000.
pub fn host_usecs_from_unix_millis(ms: i64) -> Option<i64> {
    ms.checked_mul(USECS_PER_MSEC)?
        .checked_sub(HOST_EPOCH_OFFSET_USECS)
}

/// Host microseconds since 2000 to remote milliseconds since 1970.
///
/// Sub-millisecond precision is dropped by flooring, so instants before 1970
/// round towards the earlier millisecond like later ones do.
pub fn unix_millis_from_host_usecs(us: i64) -> Option<i64> {
    Some(
        us.checked_add(HOST_EPOCH_OFFSET_USECS)?
            .div_euclid(USECS_PER_MSEC),
    )
}

/// Remote centred day number to host days since 2000.
pub fn host_days_from_remote_date(day: u32) -> Option<i32> {
    i32::try_from(i64::from(day) - REMOTE_DATE_CENTER - HOST_EPOCH_OFFSET_DAYS).ok()
}

/// Host days since 2000 to the remote centred day number.
pub fn remote_date_from_host_days(days: i32) -> Option<u32> {
    u32::try_from(i64::from(days) + HOST_EPOCH_OFFSET_DAYS + REMOTE_DATE_CENTER).ok()
}

/// Remote nanoseconds since midnight to host microseconds since midnight.
pub fn host_usecs_from_nanos(ns: i64) -> Option<i64> {
    let end = USECS_PER_DAY * NSECS_PER_USEC;
    (0..end).contains(&ns).then(|| ns / NSECS_PER_USEC)
}

/// Host microseconds since midnight to remote nanoseconds since midnight.
///
/// The remote time type ends at 23:59:59.999999999, so a host `24:00:00`
/// has no remote equivalent.
pub fn nanos_from_host_usecs(us: i64) -> Option<i64> {
    if !(0..USECS_PER_DAY).contains(&us) {
        return None;
    }
    us.checked_mul(NSECS_PER_USEC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_epoch_is_negative_host_offset() {
        assert_eq!(
            host_usecs_from_unix_millis(0),
            Some(-946_684_800_000_000)
        );
        assert_eq!(host_usecs_from_unix_millis(946_684_800_000), Some(0));
    }

    #[test]
    fn millis_floor_before_1970() {
        // 1969-12-31 23:59:59.9995 floors to .999
        let us = -HOST_EPOCH_OFFSET_USECS - 500;
        assert_eq!(unix_millis_from_host_usecs(us), Some(-1));
    }

    #[test]
    fn centred_date() {
        assert_eq!(host_days_from_remote_date(1 << 31), Some(-10_957));
        assert_eq!(remote_date_from_host_days(0), Some((1u32 << 31) + 10_957));
        // Remote day 0 lies before the earliest representable host day.
        assert_eq!(host_days_from_remote_date(0), None);
        assert_eq!(remote_date_from_host_days(i32::MAX), None);
    }

    #[test]
    fn time_bounds() {
        assert_eq!(host_usecs_from_nanos(-1), None);
        assert_eq!(host_usecs_from_nanos(1_999), Some(1));
        assert_eq!(nanos_from_host_usecs(USECS_PER_DAY + 1), None);
        assert_eq!(nanos_from_host_usecs(5), Some(5_000));
    }

    #[test]
    fn end_of_day_is_exclusive() {
        assert_eq!(nanos_from_host_usecs(USECS_PER_DAY), None);
        assert_eq!(
            nanos_from_host_usecs(USECS_PER_DAY - 1),
            Some(86_399_999_999_000)
        );
        assert_eq!(host_usecs_from_nanos(86_400_000_000_000), None);
        assert_eq!(host_usecs_from_nanos(86_399_999_999_999), Some(86_399_999_999));
    }
}
