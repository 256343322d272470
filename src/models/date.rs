//! Creation timestamps as they come back from the document store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A stored `date` field.
///
/// Records written by this crate always carry the native timestamp shape. Older or
/// externally written records may hold a plain value instead, either a date string or
/// a number of milliseconds since the Unix epoch. A `null` date reads as the epoch
/// itself; a missing one is still an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredDate {
    Timestamp { seconds: i64, nanoseconds: u32 },
    Millis(f64),
    Text(String),
    Null,
}

impl StoredDate {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        StoredDate::Timestamp {
            seconds: at.timestamp(),
            nanoseconds: at.timestamp_subsec_nanos(),
        }
    }

    /// Convert any stored shape into a UTC instant.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, AppError> {
        match self {
            StoredDate::Timestamp {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Timestamp out of range: {}s {}ns",
                    seconds, nanoseconds
                ))
            }),
            StoredDate::Millis(millis) => {
                if !millis.is_finite() {
                    return Err(AppError::BadRequest(format!(
                        "Invalid millisecond timestamp: {}",
                        millis
                    )));
                }
                DateTime::from_timestamp_millis(millis.trunc() as i64).ok_or_else(|| {
                    AppError::BadRequest(format!("Timestamp out of range: {}ms", millis))
                })
            }
            StoredDate::Text(text) => parse_date_text(text),
            StoredDate::Null => Ok(DateTime::<Utc>::default()),
        }
    }

    /// The UTC calendar day (`YYYY-MM-DD`) used for display and date filtering.
    pub fn calendar_day(&self) -> Result<String, AppError> {
        Ok(self.to_datetime()?.format("%Y-%m-%d").to_string())
    }
}

fn parse_date_text(text: &str) -> Result<DateTime<Utc>, AppError> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    // Offset-less date-times are read as UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(AppError::BadRequest(format!("Unparseable date: {:?}", text)))
}
