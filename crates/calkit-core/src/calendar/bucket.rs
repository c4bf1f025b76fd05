//! Grouping date-stamped records into calendar buckets
//!
//! The calendar renders from a map of formatted date keys to the
//! records falling on that day. Input dates arrive in whatever shape
//! the consumer's data layer produces: Unix timestamps (seconds or
//! milliseconds), ISO-8601 strings, `MM/DD/YYYY` strings, or
//! already-parsed dates. One bad record fails the whole call rather
//! than silently thinning the displayed calendar.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use thiserror::Error;

/// Default output format for bucket keys, e.g. `2024. 03. 01`
pub const DEFAULT_BUCKET_FORMAT: &str = "%Y. %m. %d";

/// Unix values above this are taken as milliseconds, not seconds
const MILLIS_THRESHOLD: i64 = 9_999_999_999;

/// The shapes a record's date field arrives in
#[derive(Debug, Clone, PartialEq)]
pub enum DateValue {
    /// Unix timestamp; seconds or milliseconds decided by magnitude
    Number(i64),
    /// ISO-8601 or slash-delimited `MM/DD/YYYY`
    Text(String),
    /// Already-parsed calendar date
    Day(NaiveDate),
}

/// A record to bucket. `date: None` models a record that never carried
/// a date at all, which is a validation failure, not a skip.
#[derive(Debug, Clone)]
pub struct DateRecord<T> {
    pub date: Option<DateValue>,
    pub payload: T,
}

impl<T> DateRecord<T> {
    pub fn new(date: DateValue, payload: T) -> Self {
        Self {
            date: Some(date),
            payload,
        }
    }

    pub fn undated(payload: T) -> Self {
        Self {
            date: None,
            payload,
        }
    }
}

/// A record after bucketing, its date replaced by the formatted key
#[derive(Debug, Clone, PartialEq)]
pub struct BucketedRecord<T> {
    pub date: String,
    pub payload: T,
}

/// Formatted date key to the records on that day, keys in first-seen
/// order and records in input order within each bucket
pub type BucketMap<T> = IndexMap<String, Vec<BucketedRecord<T>>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidDateError {
    #[error("record {index} is missing its date field")]
    Missing { index: usize },

    #[error("invalid date value: {raw}")]
    Unparseable { raw: String },
}

/// Group `records` under keys produced by formatting each parsed date
/// with `format` (see [`DEFAULT_BUCKET_FORMAT`]).
///
/// Zero input records yield `Ok(None)`: no data is not an error.
pub fn bucket_by_date<T>(
    records: Vec<DateRecord<T>>,
    format: &str,
) -> Result<Option<BucketMap<T>>, InvalidDateError> {
    if records.is_empty() {
        return Ok(None);
    }
    let mut buckets: BucketMap<T> = IndexMap::new();
    for (index, record) in records.into_iter().enumerate() {
        let date = record.date.ok_or(InvalidDateError::Missing { index })?;
        let key = parse_date(&date)?.format(format).to_string();
        buckets.entry(key.clone()).or_default().push(BucketedRecord {
            date: key,
            payload: record.payload,
        });
    }
    Ok(Some(buckets))
}

fn parse_date(value: &DateValue) -> Result<NaiveDateTime, InvalidDateError> {
    match value {
        DateValue::Number(n) => {
            let parsed = if *n > MILLIS_THRESHOLD {
                DateTime::from_timestamp_millis(*n)
            } else {
                DateTime::from_timestamp(*n, 0)
            };
            parsed.map(|dt| dt.naive_utc()).ok_or_else(|| invalid(n))
        }
        DateValue::Text(raw) => parse_text(raw).ok_or_else(|| invalid(raw)),
        DateValue::Day(day) => day.and_hms_opt(0, 0, 0).ok_or_else(|| invalid(day)),
    }
}

fn invalid(raw: &impl ToString) -> InvalidDateError {
    InvalidDateError::Unparseable {
        raw: raw.to_string(),
    }
}

fn parse_text(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0);
    }
    // MM/DD/YYYY, reassembled as YYYY-MM-DD
    if let [month, day, year] = raw.split('/').collect::<Vec<_>>().as_slice() {
        let iso = format!("{year}-{month:0>2}-{day:0>2}");
        if let Ok(parsed) = NaiveDate::parse_from_str(&iso, "%Y-%m-%d") {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }
    None
}
