//! Resolved spans and shift state classification results.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ShiftRecord;

/// A shift's concrete wall-clock span. `end` is always after `start`.
///
/// # Example
///
/// ```
/// use shift_ledger::models::ResolvedSpan;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let span = ResolvedSpan {
///     start: NaiveDateTime::parse_from_str("2026-01-15 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2026-01-16 06:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// };
/// assert_eq!(span.duration_hours(), Decimal::new(85, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedSpan {
    /// The start instant.
    pub start: NaiveDateTime,
    /// The end instant.
    pub end: NaiveDateTime,
}

impl ResolvedSpan {
    /// Returns the span length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Returns the span length in hours.
    pub fn duration_hours(&self) -> Decimal {
        Decimal::new(self.duration_minutes(), 0) / Decimal::new(60, 0)
    }

    /// Returns `true` if the span ends on a later calendar day than it starts.
    pub fn crosses_midnight(&self) -> bool {
        self.end.date() > self.start.date()
    }
}

/// Lifecycle state of a shift relative to the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftState {
    /// The shift has not started yet.
    Scheduled,
    /// The shift is in progress, or inside its trailing grace window.
    Active,
    /// The shift is over, was closed explicitly, or cannot be resolved.
    Ended,
}

impl std::fmt::Display for ShiftState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftState::Scheduled => write!(f, "Scheduled"),
            ShiftState::Active => write!(f, "Active"),
            ShiftState::Ended => write!(f, "Ended"),
        }
    }
}

/// A shift record annotated with its resolved span and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedShift {
    /// The underlying record.
    pub record: ShiftRecord,
    /// The resolved span, or `None` when it could not be resolved.
    pub span: Option<ResolvedSpan>,
    /// The state at the evaluation instant.
    pub state: ShiftState,
}

impl ClassifiedShift {
    /// The instant used to order and bucket this shift.
    ///
    /// This is the span start, or the nominal date at midnight when the span
    /// is unresolvable.
    pub fn anchor(&self) -> NaiveDateTime {
        match &self.span {
            Some(span) => span.start,
            None => self.record.date.and_time(NaiveTime::MIN),
        }
    }

    /// Returns `true` if the shift classified as active.
    pub fn is_active(&self) -> bool {
        self.state == ShiftState::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn bare_record(date: &str) -> ShiftRecord {
        ShiftRecord {
            id: 1,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            shift_type_code: None,
            start_time: None,
            end_time: None,
            overtime_hours: Decimal::ZERO,
            overtime_rate: None,
            tip_amount: Decimal::ZERO,
            is_ended: false,
            base_hours: Decimal::ZERO,
        }
    }

    #[test]
    fn test_span_duration_and_midnight_crossing() {
        let day = ResolvedSpan {
            start: make_datetime("2026-01-15", "09:00:00"),
            end: make_datetime("2026-01-15", "17:00:00"),
        };
        let night = ResolvedSpan {
            start: make_datetime("2026-01-15", "16:00:00"),
            end: make_datetime("2026-01-16", "00:30:00"),
        };

        assert_eq!(day.duration_minutes(), 480);
        assert!(!day.crosses_midnight());
        assert_eq!(night.duration_hours(), Decimal::new(85, 1));
        assert!(night.crosses_midnight());
    }

    #[test]
    fn test_anchor_uses_span_start() {
        let start = make_datetime("2026-01-15", "09:00:00");
        let shift = ClassifiedShift {
            record: bare_record("2026-01-15"),
            span: Some(ResolvedSpan {
                start,
                end: make_datetime("2026-01-15", "17:00:00"),
            }),
            state: ShiftState::Active,
        };
        assert_eq!(shift.anchor(), start);
        assert!(shift.is_active());
    }

    #[test]
    fn test_anchor_falls_back_to_midnight() {
        let shift = ClassifiedShift {
            record: bare_record("2026-01-15"),
            span: None,
            state: ShiftState::Ended,
        };
        assert_eq!(shift.anchor(), make_datetime("2026-01-15", "00:00:00"));
    }

    #[test]
    fn test_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ShiftState::Scheduled).unwrap(),
            "\"scheduled\""
        );
        assert_eq!(ShiftState::Active.to_string(), "Active");
    }
}
