//! Raw time-of-day values as delivered by a data source.
//!
//! Times arrive either as colon-delimited strings (`"06:30"`, `"06:30:00"`)
//! or as an hour/minute pair. Both are normalized to a minute-precision
//! [`NaiveTime`] before any span arithmetic happens.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A time of day in one of the accepted raw representations.
///
/// # Example
///
/// ```
/// use shift_ledger::models::TimeOfDay;
///
/// let text: TimeOfDay = serde_json::from_str(r#""22:00:00""#).unwrap();
/// let pair: TimeOfDay = serde_json::from_str(r#"{"hour": 22, "minute": 0}"#).unwrap();
///
/// assert_eq!(text.to_hhmm().unwrap(), "22:00");
/// assert_eq!(text.normalize().unwrap(), pair.normalize().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeOfDay {
    /// A two-field hour/minute pair.
    Fields {
        /// Hour of day, 0-23.
        hour: u32,
        /// Minute of hour, 0-59.
        minute: u32,
    },
    /// A colon-delimited `HH:MM` or `HH:MM:SS` string.
    Text(String),
}

impl TimeOfDay {
    /// Creates a time from an hour/minute pair.
    pub fn hm(hour: u32, minute: u32) -> Self {
        TimeOfDay::Fields { hour, minute }
    }

    /// Normalizes the raw value to a [`NaiveTime`] with seconds dropped.
    ///
    /// Returns [`EngineError::InvalidTimeOfDay`] for malformed or
    /// out-of-range values.
    pub fn normalize(&self) -> EngineResult<NaiveTime> {
        let (hour, minute) = match self {
            TimeOfDay::Fields { hour, minute } => (*hour, *minute),
            TimeOfDay::Text(raw) => {
                let time = parse_clock_text(raw).ok_or_else(|| self.invalid())?;
                (time.hour(), time.minute())
            }
        };

        NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| self.invalid())
    }

    /// Returns the canonical `HH:MM` rendering of this time.
    pub fn to_hhmm(&self) -> EngineResult<String> {
        self.normalize().map(|t| t.format("%H:%M").to_string())
    }

    fn invalid(&self) -> EngineError {
        let value = match self {
            TimeOfDay::Fields { hour, minute } => format!("{}:{}", hour, minute),
            TimeOfDay::Text(raw) => raw.clone(),
        };
        EngineError::InvalidTimeOfDay { value }
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        TimeOfDay::hm(time.hour(), time.minute())
    }
}

/// Parses `HH:MM` or `HH:MM:SS`, tolerating fractional seconds.
fn parse_clock_text(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S%.f"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_text_hh_mm() {
        let t = TimeOfDay::Text("06:30".to_string());
        assert_eq!(t.normalize().unwrap(), time(6, 30));
    }

    #[test]
    fn test_text_with_seconds_drops_seconds() {
        let t = TimeOfDay::Text("23:15:42".to_string());
        assert_eq!(t.normalize().unwrap(), time(23, 15));
        assert_eq!(t.to_hhmm().unwrap(), "23:15");
    }

    #[test]
    fn test_text_single_digit_hour() {
        let t = TimeOfDay::Text("7:05".to_string());
        assert_eq!(t.to_hhmm().unwrap(), "07:05");
    }

    #[test]
    fn test_text_with_fractional_seconds() {
        let t = TimeOfDay::Text(" 22:00:00.000 ".to_string());
        assert_eq!(t.normalize().unwrap(), time(22, 0));
    }

    #[test]
    fn test_fields_pair() {
        let t = TimeOfDay::hm(0, 30);
        assert_eq!(t.normalize().unwrap(), time(0, 30));
        assert_eq!(t.to_hhmm().unwrap(), "00:30");
    }

    #[test]
    fn test_out_of_range_hour_is_rejected() {
        let t = TimeOfDay::hm(24, 0);
        match t.normalize() {
            Err(EngineError::InvalidTimeOfDay { value }) => assert_eq!(value, "24:0"),
            other => panic!("Expected InvalidTimeOfDay, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_text_is_rejected() {
        for raw in ["", "noon", "12", "12:xx", "1:2:3:4", "10:30:75", "24:00", "12:60"] {
            let t = TimeOfDay::Text(raw.to_string());
            assert!(t.normalize().is_err(), "'{}' should be rejected", raw);
        }
    }

    #[test]
    fn test_deserialize_both_forms() {
        let text: TimeOfDay = serde_json::from_str(r#""16:00""#).unwrap();
        let pair: TimeOfDay = serde_json::from_str(r#"{"hour":16,"minute":0}"#).unwrap();
        assert_eq!(text, TimeOfDay::Text("16:00".to_string()));
        assert_eq!(pair, TimeOfDay::hm(16, 0));
    }

    #[test]
    fn test_from_naive_time() {
        let t: TimeOfDay = time(14, 45).into();
        assert_eq!(t, TimeOfDay::hm(14, 45));
    }
}
