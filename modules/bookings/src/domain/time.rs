//! Parsing of the date and instant formats accepted on the wire.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::domain::error::DomainError;

/// Parses an ISO-8601 instant (`2024-03-01T10:30:00Z`, offsets allowed) into UTC.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DomainError::invalid_date_time(value))
}

/// Midnight at the start of `date` and midnight at the start of the following day, both UTC.
pub fn utc_day_bounds(date: &str) -> Result<(DateTime<Utc>, DateTime<Utc>), DomainError> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::invalid_date(date))?;
    let next = day.succ_opt().ok_or_else(|| DomainError::invalid_date(date))?;
    Ok((
        Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)),
        Utc.from_utc_datetime(&next.and_time(NaiveTime::MIN)),
    ))
}
