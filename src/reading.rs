use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::{ChartError, Result};

/// Format of the joined `Date` and `Time` columns, e.g. `6/1/2022 7:05 AM`.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M %p";

/// One row of a CSV export, before the date and time are combined.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RawRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Systolic")]
    pub systolic: u32,
    #[serde(rename = "Diastolic")]
    pub diastolic: u32,
    #[serde(rename = "Heart Rate")]
    pub heart_rate: u32,
}

/// A single timestamped blood pressure and heart rate observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    /// mmHg
    pub systolic: u32,
    /// mmHg
    pub diastolic: u32,
    /// beats per minute
    pub heart_rate: u32,
}

impl Reading {
    pub fn new(timestamp: DateTime<Utc>, systolic: u32, diastolic: u32, heart_rate: u32) -> Self {
        Self {
            timestamp,
            systolic,
            diastolic,
            heart_rate,
        }
    }
}

impl TryFrom<RawRecord> for Reading {
    type Error = ChartError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        Ok(Reading {
            timestamp: parse_timestamp(&raw.date, &raw.time)?,
            systolic: raw.systolic,
            diastolic: raw.diastolic,
            heart_rate: raw.heart_rate,
        })
    }
}

/// Combine separate date and time fields into a UTC timestamp.
///
/// The exports carry no zone information, so the wall clock value is taken
/// as UTC rather than local time.
pub fn parse_timestamp(date: &str, time: &str) -> Result<DateTime<Utc>> {
    let joined = format!("{} {}", date.trim(), time.trim());
    let naive = NaiveDateTime::parse_from_str(&joined, TIMESTAMP_FORMAT)
        .map_err(|_| ChartError::TimestampParse(joined.clone()))?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Convert raw records into readings sorted by timestamp.
///
/// Fails on the first malformed timestamp. The sort is stable, so readings
/// sharing a timestamp keep their file order.
pub fn normalize(records: Vec<RawRecord>) -> Result<Vec<Reading>> {
    let mut readings = records
        .into_iter()
        .map(Reading::try_from)
        .collect::<Result<Vec<_>>>()?;
    readings.sort_by_key(|r| r.timestamp);
    Ok(readings)
}
