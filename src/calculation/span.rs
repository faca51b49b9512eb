//! Time span resolution.
//!
//! This module turns a shift's nominal date and start/end times of day into
//! a concrete [`ResolvedSpan`]. A shift whose end time is at or before its
//! start time on the same date runs into the following calendar day.

use chrono::{Days, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{ResolvedSpan, ShiftRecord, ShiftTypeCatalog, ShiftTypeDefinition, TimeOfDay};

/// Resolves a shift's span from its date and times.
///
/// Missing times fall back to the shift type's `default_start` /
/// `default_end`. The end instant is placed on the same date as the start;
/// if that is not strictly after the start it is advanced by exactly one
/// calendar day.
///
/// # Arguments
///
/// * `shift_id` - Id used in error reporting
/// * `date` - The shift's nominal date
/// * `start` - Explicit start time, if any
/// * `end` - Explicit end time, if any
/// * `shift_type` - The shift type supplying defaults, if any
///
/// # Returns
///
/// The resolved span, or [`EngineError::UnresolvableSpan`] if a time is
/// missing after fallback or is malformed. A malformed explicit time is not
/// replaced by the default.
///
/// # Examples
///
/// ```
/// use shift_ledger::calculation::resolve_span;
/// use shift_ledger::models::TimeOfDay;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let span = resolve_span(
///     1,
///     date,
///     Some(&TimeOfDay::Text("22:00".to_string())),
///     Some(&TimeOfDay::hm(6, 0)),
///     None,
/// )
/// .unwrap();
///
/// assert_eq!(
///     span.end,
///     NaiveDateTime::parse_from_str("2026-01-16 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
/// );
/// ```
pub fn resolve_span(
    shift_id: u64,
    date: NaiveDate,
    start: Option<&TimeOfDay>,
    end: Option<&TimeOfDay>,
    shift_type: Option<&ShiftTypeDefinition>,
) -> EngineResult<ResolvedSpan> {
    let start_time = pick_time(
        shift_id,
        "start",
        start,
        shift_type.and_then(|t| t.default_start.as_ref()),
    )?;
    let end_time = pick_time(
        shift_id,
        "end",
        end,
        shift_type.and_then(|t| t.default_end.as_ref()),
    )?;

    let start_instant = date.and_time(start_time);
    let mut end_instant = date.and_time(end_time);

    if end_instant <= start_instant {
        end_instant = end_instant
            .checked_add_days(Days::new(1))
            .ok_or_else(|| EngineError::UnresolvableSpan {
                shift_id,
                reason: "end date out of range".to_string(),
            })?;
    }

    Ok(ResolvedSpan {
        start: start_instant,
        end: end_instant,
    })
}

/// Resolves a stored record's span, using the catalog for default times.
///
/// An unknown shift type code contributes no defaults.
pub fn resolve_record_span(
    record: &ShiftRecord,
    catalog: &ShiftTypeCatalog,
) -> EngineResult<ResolvedSpan> {
    let shift_type = record
        .shift_type_code
        .as_deref()
        .and_then(|code| catalog.get(code));

    resolve_span(
        record.id,
        record.date,
        record.start_time.as_ref(),
        record.end_time.as_ref(),
        shift_type,
    )
}

/// Worked hours in a span after deducting an unpaid break, floored at zero.
///
/// # Examples
///
/// ```
/// use shift_ledger::calculation::net_worked_hours;
/// use shift_ledger::models::ResolvedSpan;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// // 06:30 - 15:30 with a 60 minute unpaid break
/// let span = ResolvedSpan {
///     start: NaiveDateTime::parse_from_str("2026-01-15 06:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2026-01-15 15:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// };
/// assert_eq!(net_worked_hours(&span, 60), Decimal::new(8, 0));
/// ```
pub fn net_worked_hours(span: &ResolvedSpan, unpaid_break_minutes: u32) -> Decimal {
    let net_minutes = (span.duration_minutes() - i64::from(unpaid_break_minutes)).max(0);
    Decimal::new(net_minutes, 0) / Decimal::new(60, 0)
}

/// Chooses the explicit time or the default, then normalizes it.
fn pick_time(
    shift_id: u64,
    which: &str,
    explicit: Option<&TimeOfDay>,
    default: Option<&TimeOfDay>,
) -> EngineResult<NaiveTime> {
    let raw = explicit
        .or(default)
        .ok_or_else(|| EngineError::UnresolvableSpan {
            shift_id,
            reason: format!("missing {} time", which),
        })?;

    raw.normalize().map_err(|err| EngineError::UnresolvableSpan {
        shift_id,
        reason: format!("{} time: {}", which, err),
    })
}
