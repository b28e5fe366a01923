//! ISO-8601 timestamp normalization
//!
//! The server is not consistent about offsets: some deployments send
//! `2021-01-01T00:00:00+00:00`, others a bare `2021-01-01T00:00:00`. Both are
//! accepted here and normalized to UTC. Values without an offset are read in
//! the configured naive offset.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::error::{MystbinError, Result};

/// Formats carrying an explicit numeric offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Formats without any offset
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a required timestamp field
///
/// `field` only names the value in the error.
pub fn parse_timestamp(field: &str, value: &str, naive_offset: FixedOffset) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Ok(parsed.with_timezone(&Utc));
        }
    }

    // `Z` without the RFC 3339 `T` separator, e.g. "2021-01-01 00:00:00Z"
    if let Some(utc_value) = value.strip_suffix(['Z', 'z']) {
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(utc_value, format) {
                return Ok(naive.and_utc());
            }
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return localize(field, value, naive, naive_offset);
        }
    }

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| MystbinError::malformed_timestamp_with_source(field, value, err))?;

    match date.and_hms_opt(0, 0, 0) {
        Some(midnight) => localize(field, value, midnight, naive_offset),
        None => Err(MystbinError::malformed_timestamp(field, value)),
    }
}

/// Parse an optional timestamp field
///
/// Absent and blank values both mean "not set".
pub fn parse_optional_timestamp(
    field: &str,
    value: Option<&str>,
    naive_offset: FixedOffset,
) -> Result<Option<DateTime<Utc>>> {
    match value {
        Some(raw) if !raw.trim().is_empty() => parse_timestamp(field, raw, naive_offset).map(Some),
        _ => Ok(None),
    }
}

fn localize(
    field: &str,
    value: &str,
    naive: NaiveDateTime,
    offset: FixedOffset,
) -> Result<DateTime<Utc>> {
    naive
        .and_local_timezone(offset)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| MystbinError::malformed_timestamp(field, value))
}
