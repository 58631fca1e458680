//! Timestamp layouts used by the console field and the file line prefix

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Layout of the timestamp field, e.g. `[15:04:05.000]`.
pub const FIELD_FORMAT: &str = "[%H:%M:%S%.3f]";

/// Layout of the date and time that prefix every file line, e.g.
/// `2025/01/08 10:30:45.123456`.
pub const FILE_PREFIX_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";

/// Format a record time as the timestamp field
#[must_use]
pub fn format_field<Tz>(datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    datetime.format(FIELD_FORMAT).to_string()
}

/// Format a write time as the file line prefix
#[must_use]
pub fn format_file_prefix<Tz>(datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    datetime.format(FILE_PREFIX_FORMAT).to_string()
}
