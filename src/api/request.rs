//! Request types for the shift ledger API.
//!
//! Shift create and update bodies are [`ShiftDraft`](crate::models::ShiftDraft)
//! and the `/earnings` body is [`EarningsInput`](crate::models::EarningsInput);
//! this module holds the remaining query and body shapes.

use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::source::DateRange;

/// Optional evaluation instant for clock-dependent endpoints.
///
/// `now` is formatted `YYYY-MM-DDTHH:MM:SS`. When absent the local clock is
/// read once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClockQuery {
    /// Evaluation instant override.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

impl ClockQuery {
    /// Returns the override, or the current local time.
    pub fn resolve(&self) -> NaiveDateTime {
        self.now.unwrap_or_else(|| Local::now().naive_local())
    }
}

/// Query for `GET /shifts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftListQuery {
    /// Evaluation instant override.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
    /// First nominal date to include.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Last nominal date to include.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl ShiftListQuery {
    /// Returns the evaluation instant.
    pub fn clock(&self) -> ClockQuery {
        ClockQuery { now: self.now }
    }

    /// Returns the date range hint, open ends filled with the extremes.
    pub fn range(&self) -> Option<DateRange> {
        match (self.from, self.to) {
            (None, None) => None,
            (from, to) => Some(DateRange {
                start: from.unwrap_or(NaiveDate::MIN),
                end: to.unwrap_or(NaiveDate::MAX),
            }),
        }
    }
}

/// Request body for `POST /shifts/weekly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyBatchRequest {
    /// Date of the first day in the batch.
    pub first_day: NaiveDate,
    /// Shift type code per day, `null` for days left empty.
    pub selections: Vec<Option<String>>,
}

/// Request body for `POST /shifts/{id}/tip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipRequest {
    /// The new tip amount.
    pub tip_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_query_uses_override() {
        let now = NaiveDateTime::parse_from_str("2026-01-15 12:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let query = ClockQuery { now: Some(now) };
        assert_eq!(query.resolve(), now);
    }

    #[test]
    fn test_list_query_range() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
        let query = ShiftListQuery {
            from: Some(from),
            ..Default::default()
        };

        let range = query.range().unwrap();
        assert_eq!(range.start, from);
        assert_eq!(range.end, NaiveDate::MAX);
        assert!(ShiftListQuery::default().range().is_none());
    }

    #[test]
    fn test_weekly_request_accepts_nulls() {
        let json = r#"{ "first_day": "2026-01-11", "selections": ["MORNING", null, "NIGHT"] }"#;
        let request: WeeklyBatchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.selections.len(), 3);
        assert!(request.selections[1].is_none());
    }
}
