//! Weekly batch planning.
//!
//! Turns a week of per-day shift type selections into drafts, one for each
//! selected day, with the shift type's default times filled in.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use super::span::resolve_span;
use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftDraft, ShiftTypeCatalog};

/// Number of consecutive days covered by one batch.
pub const WEEK_DAYS: usize = 7;

/// Plans a batch of shifts over the days starting at `first_day`.
///
/// `selections[i]` is the shift type code chosen for `first_day + i`, or
/// `None` (or a blank string) to leave the day empty.
///
/// # Errors
///
/// * [`EngineError::FeatureLocked`] when `allowed` is false
/// * [`EngineError::InvalidInput`] for more than [`WEEK_DAYS`] selections,
///   or when no day is selected
/// * [`EngineError::ShiftTypeNotFound`] for an unknown code
/// * [`EngineError::InvalidInput`] when a selected type's default times do
///   not resolve to a span
///
/// Every planned day is checked before any draft is returned, so a batch
/// either plans completely or not at all.
///
/// # Examples
///
/// ```
/// use shift_ledger::calculation::plan_week;
/// use shift_ledger::models::{ShiftTypeCatalog, ShiftTypeDefinition, TimeOfDay};
/// use chrono::NaiveDate;
///
/// let catalog = ShiftTypeCatalog::new(vec![ShiftTypeDefinition {
///     code: "MORNING".to_string(),
///     name: "Morning".to_string(),
///     default_start: Some(TimeOfDay::hm(6, 30)),
///     default_end: Some(TimeOfDay::hm(15, 30)),
///     unpaid_break_minutes: 60,
///     sort_order: 10,
/// }])
/// .unwrap();
///
/// let first_day = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
/// let selections = vec![Some("MORNING".to_string()), None, Some("MORNING".to_string())];
/// let drafts = plan_week(first_day, &selections, &catalog, true).unwrap();
///
/// assert_eq!(drafts.len(), 2);
/// assert_eq!(drafts[1].date, NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
/// ```
pub fn plan_week(
    first_day: NaiveDate,
    selections: &[Option<String>],
    catalog: &ShiftTypeCatalog,
    allowed: bool,
) -> EngineResult<Vec<ShiftDraft>> {
    if !allowed {
        return Err(EngineError::FeatureLocked {
            feature: "weekly_batch".to_string(),
        });
    }
    if selections.len() > WEEK_DAYS {
        return Err(EngineError::invalid_input(
            "selections",
            format!("at most {} days per batch", WEEK_DAYS),
        ));
    }

    let mut drafts = Vec::new();
    for (offset, selection) in selections.iter().enumerate() {
        let Some(code) = selection.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
            continue;
        };

        let shift_type = catalog.require(code)?;
        let date = first_day
            .checked_add_days(Days::new(offset as u64))
            .ok_or_else(|| EngineError::invalid_input("first_day", "date out of range"))?;

        let draft = ShiftDraft {
            date,
            shift_type_code: Some(shift_type.code.clone()),
            start_time: shift_type.default_start.clone(),
            end_time: shift_type.default_end.clone(),
            overtime_hours: Decimal::ZERO,
            overtime_rate: None,
            tip_amount: None,
        };
        resolve_span(0, date, draft.start_time.as_ref(), draft.end_time.as_ref(), None)
            .map_err(|err| {
                EngineError::invalid_input(
                    "selections",
                    format!("{} on {}: {}", shift_type.code, date, err),
                )
            })?;

        drafts.push(draft);
    }

    if drafts.is_empty() {
        return Err(EngineError::invalid_input(
            "selections",
            "choose at least one shift",
        ));
    }

    debug!(first_day = %first_day, planned = drafts.len(), "Planned weekly batch");
    Ok(drafts)
}
