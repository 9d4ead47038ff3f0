use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const SECOND: i64 = 1000;
pub const MINUTE: i64 = SECOND * 60;
pub const HOUR: i64 = MINUTE * 60;
pub const DAY: i64 = HOUR * 24;
pub const YEAR: i64 = DAY * 365;

/// Timeout value meaning "disabled / never triggers".
pub const DISABLED: i64 = -1;

pub fn unix_millis(time: SystemTime) -> Option<i64> {
    time.duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_millis() as i64)
}

pub fn unix_millis_now() -> i64 {
    unix_millis(SystemTime::now()).unwrap_or(0)
}

/// `None` for the disabled sentinel and for zero, the timeout as a `Duration` otherwise.
pub fn timeout_duration(millis: i64) -> Option<Duration> {
    if millis <= 0 {
        return None;
    }
    Some(Duration::from_millis(millis as u64))
}
