//! Shift record model and related types.
//!
//! This module defines [`ShiftRecord`], a snapshot of one logged work period
//! as delivered by the data source, and [`ShiftDraft`], the user input from
//! which records are created or edited.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::TimeOfDay;

/// A single logged work period.
///
/// Records are immutable snapshots: the engine derives values from them but
/// never changes them in place. Transitions such as ending a shift or adding
/// a tip return a new record for the data source to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Opaque identifier; higher ids were created later.
    pub id: u64,
    /// The shift's nominal day, used to anchor its span.
    pub date: NaiveDate,
    /// Reference to a shift type, absent for free-form shifts.
    #[serde(default)]
    pub shift_type_code: Option<String>,
    /// Start time of day, falling back to the shift type's default.
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    /// End time of day, falling back to the shift type's default.
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    /// Overtime hours logged on top of the base hours.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Overtime rate for this shift, if one was entered.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// Gratuity received for this shift.
    #[serde(default)]
    pub tip_amount: Decimal,
    /// Set once the worker explicitly closes or completes the shift.
    #[serde(default)]
    pub is_ended: bool,
    /// Billed hours as computed by the data source.
    #[serde(default)]
    pub base_hours: Decimal,
}

impl ShiftRecord {
    /// Returns base hours plus overtime hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_ledger::models::ShiftRecord;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let record = ShiftRecord {
    ///     id: 1,
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     shift_type_code: None,
    ///     start_time: None,
    ///     end_time: None,
    ///     overtime_hours: Decimal::new(15, 1),
    ///     overtime_rate: None,
    ///     tip_amount: Decimal::ZERO,
    ///     is_ended: false,
    ///     base_hours: Decimal::new(80, 1),
    /// };
    /// assert_eq!(record.total_hours(), Decimal::new(95, 1));
    /// ```
    pub fn total_hours(&self) -> Decimal {
        self.base_hours + self.overtime_hours
    }

    /// Returns a copy of this record closed at `now`.
    ///
    /// The end time becomes `now` truncated to the minute and the record is
    /// flagged as ended.
    pub fn ended_at(&self, now: NaiveDateTime) -> ShiftRecord {
        ShiftRecord {
            end_time: Some(TimeOfDay::from(now.time())),
            is_ended: true,
            ..self.clone()
        }
    }

    /// Returns a copy of this record with the tip replaced.
    pub fn with_tip(&self, tip_amount: Decimal) -> EngineResult<ShiftRecord> {
        if tip_amount < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "tip_amount",
                "must not be negative",
            ));
        }
        Ok(ShiftRecord {
            tip_amount,
            ..self.clone()
        })
    }
}

/// User input for creating or editing a shift.
///
/// # Example
///
/// ```
/// use shift_ledger::models::ShiftDraft;
///
/// let draft: ShiftDraft = serde_json::from_str(r#"{
///     "date": "2026-01-15",
///     "shift_type_code": "MORNING"
/// }"#).unwrap();
/// assert!(draft.start_time.is_none());
/// assert!(draft.tip_amount.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDraft {
    /// The shift's nominal day.
    pub date: NaiveDate,
    /// Optional shift type reference.
    #[serde(default)]
    pub shift_type_code: Option<String>,
    /// Optional explicit start time.
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    /// Optional explicit end time.
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    /// Overtime hours.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Overtime rate entered for this shift.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// Tip amount; `None` keeps the existing tip on update.
    #[serde(default)]
    pub tip_amount: Option<Decimal>,
}
