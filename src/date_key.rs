use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use log::{info, warn};
use thiserror::Error;

/// Asia/Taipei. No daylight saving, so a fixed offset is exact.
const UTC_OFFSET_SECONDS: i32 = 8 * 3600;
const KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum DateKeyError {
    #[error("invalid timezone offset {0}s")]
    Offset(i32),

    #[error("date override {0:?} is not a YYYY-MM-DD calendar date")]
    InvalidOverride(String),
}

/// Calendar day in the quiz timezone. Names the content folder and nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn today() -> Result<Self, DateKeyError> {
        Self::at(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Result<Self, DateKeyError> {
        let offset = FixedOffset::east_opt(UTC_OFFSET_SECONDS)
            .ok_or(DateKeyError::Offset(UTC_OFFSET_SECONDS))?;
        Ok(Self(instant.with_timezone(&offset).date_naive()))
    }

    /// Strict `YYYY-MM-DD`; chrono alone would also take `2025-1-5`.
    pub fn parse(raw: &str) -> Result<Self, DateKeyError> {
        let raw = raw.trim();
        let invalid = || DateKeyError::InvalidOverride(raw.to_string());

        let date = NaiveDate::parse_from_str(raw, KEY_FORMAT).map_err(|_| invalid())?;
        if date.format(KEY_FORMAT).to_string() != raw {
            return Err(invalid());
        }
        Ok(Self(date))
    }

    /// Uses the `date` query override when it is a valid key, otherwise today.
    pub fn resolve(override_param: Option<&str>) -> Result<Self, DateKeyError> {
        if let Some(raw) = override_param {
            match Self::parse(raw) {
                Ok(key) => {
                    info!("Using date override {key}");
                    return Ok(key);
                }
                Err(e) => warn!("Ignoring {e}"),
            }
        }
        Self::today()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rolls_over_at_taipei_midnight() {
        let before = Utc.with_ymd_and_hms(2025, 10, 28, 15, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 10, 28, 16, 0, 0).unwrap();

        assert_eq!(DateKey::at(before).unwrap().to_string(), "2025-10-28");
        assert_eq!(DateKey::at(after).unwrap().to_string(), "2025-10-29");
    }

    #[test]
    fn parse_accepts_zero_padded_dates_only() {
        assert_eq!(DateKey::parse(" 2025-11-01 ").unwrap().to_string(), "2025-11-01");

        for bad in ["2025-1-5", "2025-02-30", "20251101", "tomorrow", ""] {
            assert!(
                matches!(DateKey::parse(bad), Err(DateKeyError::InvalidOverride(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn valid_override_wins() {
        let key = DateKey::resolve(Some("2024-02-29")).unwrap();
        assert_eq!(key.to_string(), "2024-02-29");
    }

    #[test]
    fn invalid_override_falls_back_to_today() {
        let key = DateKey::resolve(Some("not-a-date")).unwrap();
        let today = DateKey::today().unwrap();
        // Both read the clock; tolerate a midnight tick between them.
        assert!(key == today || key.0.succ_opt() == Some(today.0));
    }
}
