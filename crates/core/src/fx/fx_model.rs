use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::FxError;

/// Calendar hour a rate lookup belongs to, formatted `YYYY-MM-DD-HH`.
///
/// Callers pass the bucket explicitly so a whole run converts with the
/// same rates, and tests can pin a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RateBucket(String);

impl RateBucket {
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self::from_naive(at.naive_utc())
    }

    pub fn from_naive(at: NaiveDateTime) -> Self {
        RateBucket(format!("{}-{:02}", at.date().format("%Y-%m-%d"), at.hour()))
    }

    /// Bucket for the current wall-clock hour.
    pub fn current() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Parses an existing `YYYY-MM-DD-HH` tag.
    pub fn parse(tag: &str) -> Result<Self, FxError> {
        let (date, hour) = tag
            .rsplit_once('-')
            .ok_or_else(|| FxError::InvalidBucket(tag.to_string()))?;
        let hour: u32 = hour
            .parse()
            .map_err(|_| FxError::InvalidBucket(tag.to_string()))?;
        let date = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| FxError::InvalidBucket(tag.to_string()))?;
        let at = date
            .and_hms_opt(hour, 0, 0)
            .ok_or_else(|| FxError::InvalidBucket(tag.to_string()))?;
        Ok(Self::from_naive(at))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateSource {
    Identity,
    Spot,
    Fallback,
}

/// A rate as resolved for one (pair, bucket).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRate {
    pub rate: Decimal,
    pub source: RateSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bucket_formats_calendar_hour() {
        let at = Utc.with_ymd_and_hms(2024, 3, 8, 7, 59, 59).unwrap();
        assert_eq!(RateBucket::from_datetime(at).as_str(), "2024-03-08-07");
    }

    #[test]
    fn test_same_hour_shares_bucket() {
        let a = Utc.with_ymd_and_hms(2024, 3, 8, 14, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 3, 8, 14, 45, 10).unwrap();
        assert_eq!(RateBucket::from_datetime(a), RateBucket::from_datetime(b));
    }

    #[test]
    fn test_parse_round_trips_and_rejects_garbage() {
        let bucket = RateBucket::parse("2024-12-31-23").unwrap();
        assert_eq!(bucket.to_string(), "2024-12-31-23");
        assert!(RateBucket::parse("2024-12-31-24").is_err());
        assert!(RateBucket::parse("yesterday").is_err());
    }
}
