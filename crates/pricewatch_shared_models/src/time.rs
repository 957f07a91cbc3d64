use chrono::{DateTime, FixedOffset, Timelike};

/// Renders a zoned timestamp as `YYYY-MM-DD HH:MM:SS[.ffffff]+HH:MM`.
///
/// Sub-second precision is kept to microseconds and only printed when it is
/// non-zero. Snapshots and reports share this layout.
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    let micros = timestamp.nanosecond() / 1_000;
    let date_time = timestamp.format("%Y-%m-%d %H:%M:%S");
    let offset = timestamp.format("%:z");

    if micros == 0 {
        format!("{date_time}{offset}")
    } else {
        format!("{date_time}.{micros:06}{offset}")
    }
}
