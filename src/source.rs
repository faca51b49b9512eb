//! Shift data sources.
//!
//! The engine reads shift records, the shift type catalog and the rate
//! profile through the [`ShiftDataSource`] trait. [`InMemoryShiftSource`] is
//! the bundled implementation backing the HTTP API.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Days, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::{net_worked_hours, resolve_record_span, resolve_span, validate_draft};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ShiftDraft, ShiftRecord, ShiftTypeCatalog, ShiftTypeDefinition, TimeOfDay,
    WorkplaceRateProfile,
};

/// An inclusive range of nominal shift dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date in the range.
    pub start: NaiveDate,
    /// Last date in the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns `true` if `date` falls within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Storage contract for shift records.
///
/// Unknown ids yield [`EngineError::ShiftNotFound`].
pub trait ShiftDataSource: Send + Sync {
    /// Lists shifts, optionally restricted to a date range.
    fn list_shifts(&self, period_hint: Option<DateRange>) -> EngineResult<Vec<ShiftRecord>>;

    /// Lists the shift type catalog in display order.
    fn list_shift_types(&self) -> EngineResult<Vec<ShiftTypeDefinition>>;

    /// Returns the resolved rates for the selected workplace.
    fn rate_profile(&self) -> EngineResult<WorkplaceRateProfile>;

    /// Creates a shift from a draft.
    fn create_shift(&self, draft: ShiftDraft) -> EngineResult<ShiftRecord>;

    /// Replaces a shift's fields from a draft.
    fn update_shift(&self, id: u64, draft: ShiftDraft) -> EngineResult<ShiftRecord>;

    /// Deletes a shift.
    fn delete_shift(&self, id: u64) -> EngineResult<()>;

    /// Closes a shift at `now`, setting its end time and ended flag.
    ///
    /// `now` is truncated to the minute and must fall after the start minute
    /// and less than 24 hours after the start; otherwise
    /// [`EngineError::InvalidInput`] is returned and nothing changes.
    fn end_shift_now(&self, id: u64, now: NaiveDateTime) -> EngineResult<ShiftRecord>;

    /// Sets the tip on a shift.
    fn add_or_update_tip(&self, id: u64, amount: Decimal) -> EngineResult<ShiftRecord>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: u64,
    shifts: BTreeMap<u64, ShiftRecord>,
}

/// A [`ShiftDataSource`] held in process memory.
///
/// On create and update the draft is validated, missing times are filled
/// from the shift type, and `base_hours` is derived from the span less the
/// shift type's unpaid break.
///
/// # Example
///
/// ```
/// use shift_ledger::models::{ShiftDraft, ShiftTypeCatalog, WorkplaceRateProfile, TimeOfDay};
/// use shift_ledger::source::{InMemoryShiftSource, ShiftDataSource};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let source = InMemoryShiftSource::new(
///     ShiftTypeCatalog::default(),
///     WorkplaceRateProfile {
///         hourly_rate: Decimal::new(51, 0),
///         overtime_hourly_rate: None,
///         shabat_hourly_rate: None,
///     },
/// );
///
/// let created = source
///     .create_shift(ShiftDraft {
///         date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///         shift_type_code: None,
///         start_time: Some(TimeOfDay::hm(9, 0)),
///         end_time: Some(TimeOfDay::hm(17, 0)),
///         overtime_hours: Decimal::ZERO,
///         overtime_rate: None,
///         tip_amount: None,
///     })
///     .unwrap();
///
/// assert_eq!(created.id, 1);
/// assert_eq!(created.base_hours, Decimal::new(8, 0));
/// ```
#[derive(Debug)]
pub struct InMemoryShiftSource {
    catalog: ShiftTypeCatalog,
    profile: WorkplaceRateProfile,
    store: RwLock<Store>,
}

impl InMemoryShiftSource {
    /// Creates an empty source.
    pub fn new(catalog: ShiftTypeCatalog, profile: WorkplaceRateProfile) -> Self {
        Self {
            catalog,
            profile,
            store: RwLock::new(Store::default()),
        }
    }

    /// Creates an empty source from loaded configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.catalog().clone(), config.rate_profile().clone())
    }

    /// Inserts stored records as-is, keeping their ids.
    ///
    /// Later ids continue after the highest inserted id.
    pub fn with_shifts(self, records: impl IntoIterator<Item = ShiftRecord>) -> Self {
        {
            let mut store = self.write();
            for record in records {
                store.next_id = store.next_id.max(record.id);
                store.shifts.insert(record.id, record);
            }
        }
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Builds a stored record from a draft.
    fn build_record(
        &self,
        id: u64,
        draft: ShiftDraft,
        previous: Option<&ShiftRecord>,
    ) -> EngineResult<ShiftRecord> {
        validate_draft(&draft, self.profile.overtime_rate_fallback())?;

        let shift_type = draft
            .shift_type_code
            .as_deref()
            .map(|code| self.catalog.require(code))
            .transpose()?;

        let start_time = canonical(
            draft.start_time.as_ref(),
            shift_type.and_then(|t| t.default_start.as_ref()),
            "start_time",
        )?;
        let end_time = canonical(
            draft.end_time.as_ref(),
            shift_type.and_then(|t| t.default_end.as_ref()),
            "end_time",
        )?;

        let span = resolve_span(id, draft.date, start_time.as_ref(), end_time.as_ref(), None)?;
        let unpaid_break = shift_type.map_or(0, |t| t.unpaid_break_minutes);

        Ok(ShiftRecord {
            id,
            date: draft.date,
            shift_type_code: shift_type.map(|t| t.code.clone()),
            start_time,
            end_time,
            overtime_hours: draft.overtime_hours,
            overtime_rate: draft.overtime_rate.filter(|rate| *rate > Decimal::ZERO),
            tip_amount: draft
                .tip_amount
                .or(previous.map(|p| p.tip_amount))
                .unwrap_or(Decimal::ZERO),
            is_ended: previous.is_some_and(|p| p.is_ended),
            base_hours: net_worked_hours(&span, unpaid_break),
        })
    }

    fn shift_type_of(&self, record: &ShiftRecord) -> Option<&ShiftTypeDefinition> {
        record
            .shift_type_code
            .as_deref()
            .and_then(|code| self.catalog.get(code))
    }
}

fn truncate_to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant)
}

/// Picks the explicit or default time and renders it as `HH:MM`.
fn canonical(
    explicit: Option<&TimeOfDay>,
    default: Option<&TimeOfDay>,
    field: &str,
) -> EngineResult<Option<TimeOfDay>> {
    match explicit.or(default) {
        Some(time) => {
            let hhmm = time
                .to_hhmm()
                .map_err(|e| EngineError::invalid_input(field, e.to_string()))?;
            Ok(Some(TimeOfDay::Text(hhmm)))
        }
        None => Ok(None),
    }
}

impl ShiftDataSource for InMemoryShiftSource {
    fn list_shifts(&self, period_hint: Option<DateRange>) -> EngineResult<Vec<ShiftRecord>> {
        let store = self.read();
        Ok(store
            .shifts
            .values()
            .filter(|record| period_hint.is_none_or(|range| range.contains(record.date)))
            .cloned()
            .collect())
    }

    fn list_shift_types(&self) -> EngineResult<Vec<ShiftTypeDefinition>> {
        Ok(self.catalog.definitions().to_vec())
    }

    fn rate_profile(&self) -> EngineResult<WorkplaceRateProfile> {
        Ok(self.profile.clone())
    }

    fn create_shift(&self, draft: ShiftDraft) -> EngineResult<ShiftRecord> {
        let mut store = self.write();
        let id = store.next_id + 1;
        let record = self.build_record(id, draft, None)?;

        store.next_id = id;
        store.shifts.insert(id, record.clone());
        debug!(shift_id = id, date = %record.date, "Created shift");
        Ok(record)
    }

    fn update_shift(&self, id: u64, draft: ShiftDraft) -> EngineResult<ShiftRecord> {
        let mut store = self.write();
        let previous = store
            .shifts
            .get(&id)
            .ok_or(EngineError::ShiftNotFound { id })?;
        let record = self.build_record(id, draft, Some(previous))?;

        store.shifts.insert(id, record.clone());
        debug!(shift_id = id, "Updated shift");
        Ok(record)
    }

    fn delete_shift(&self, id: u64) -> EngineResult<()> {
        if self.write().shifts.remove(&id).is_none() {
            return Err(EngineError::ShiftNotFound { id });
        }
        debug!(shift_id = id, "Deleted shift");
        Ok(())
    }

    fn end_shift_now(&self, id: u64, now: NaiveDateTime) -> EngineResult<ShiftRecord> {
        let mut store = self.write();
        let current = store
            .shifts
            .get(&id)
            .ok_or(EngineError::ShiftNotFound { id })?;
        let shift_type = self.shift_type_of(current);

        let start = current
            .start_time
            .as_ref()
            .or(shift_type.and_then(|t| t.default_start.as_ref()))
            .map(TimeOfDay::normalize)
            .transpose()?
            .map(|time| current.date.and_time(time));

        // the end is stored as a time of day, so it must land strictly
        // inside the 24 hours following the start
        let end = truncate_to_minute(now);
        if let Some(start) = start {
            if end <= start {
                return Err(EngineError::invalid_input(
                    "now",
                    "a shift can only be ended after its first minute",
                ));
            }
            if start
                .checked_add_days(Days::new(1))
                .is_some_and(|limit| end >= limit)
            {
                return Err(EngineError::invalid_input(
                    "now",
                    "a shift cannot be ended 24 hours or more after it starts",
                ));
            }
        }

        let mut ended = current.ended_at(end);
        if let Ok(span) = resolve_record_span(&ended, &self.catalog) {
            let unpaid_break = shift_type.map_or(0, |t| t.unpaid_break_minutes);
            ended.base_hours = net_worked_hours(&span, unpaid_break);
        }

        store.shifts.insert(id, ended.clone());
        debug!(shift_id = id, now = %now, "Ended shift");
        Ok(ended)
    }

    fn add_or_update_tip(&self, id: u64, amount: Decimal) -> EngineResult<ShiftRecord> {
        let mut store = self.write();
        let current = store
            .shifts
            .get(&id)
            .ok_or(EngineError::ShiftNotFound { id })?;
        let updated = current.with_tip(amount)?;

        store.shifts.insert(id, updated.clone());
        debug!(shift_id = id, tip = %amount, "Updated tip");
        Ok(updated)
    }
}
