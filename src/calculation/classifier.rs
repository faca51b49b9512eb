//! Shift state classification.
//!
//! A shift is classified against an explicit evaluation instant. The
//! classifier never reads the clock; callers pass `now` in.
//!
//! # Evaluation Order
//!
//! 1. Explicitly ended, or unresolvable span: [`ShiftState::Ended`]
//! 2. `now` before the span start: [`ShiftState::Scheduled`]
//! 3. `now` before the span end plus the grace window: [`ShiftState::Active`]
//! 4. Otherwise: [`ShiftState::Ended`]

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, warn};

use super::span::resolve_record_span;
use crate::models::{ClassifiedShift, ResolvedSpan, ShiftRecord, ShiftState, ShiftTypeCatalog};

/// Minutes after a span's end during which the shift still counts as active.
pub const GRACE_WINDOW_MINUTES: i64 = 5;

/// Classifies a shift at the instant `now`.
///
/// # Arguments
///
/// * `span` - The resolved span, or `None` if it could not be resolved
/// * `is_ended` - Whether the shift was closed explicitly
/// * `now` - The evaluation instant
///
/// # Examples
///
/// ```
/// use shift_ledger::calculation::classify;
/// use shift_ledger::models::{ResolvedSpan, ShiftState};
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let span = ResolvedSpan {
///     start: at("2026-01-15 09:00:00"),
///     end: at("2026-01-15 17:00:00"),
/// };
///
/// assert_eq!(classify(Some(&span), false, at("2026-01-15 08:59:00")), ShiftState::Scheduled);
/// assert_eq!(classify(Some(&span), false, at("2026-01-15 17:04:59")), ShiftState::Active);
/// assert_eq!(classify(Some(&span), false, at("2026-01-15 17:05:00")), ShiftState::Ended);
/// assert_eq!(classify(Some(&span), true, at("2026-01-15 12:00:00")), ShiftState::Ended);
/// ```
pub fn classify(span: Option<&ResolvedSpan>, is_ended: bool, now: NaiveDateTime) -> ShiftState {
    let span = match span {
        Some(span) if !is_ended => span,
        _ => return ShiftState::Ended,
    };

    // a grace end past the calendar's range never expires
    let grace_end = span
        .end
        .checked_add_signed(Duration::minutes(GRACE_WINDOW_MINUTES));

    if now < span.start {
        ShiftState::Scheduled
    } else if grace_end.is_none_or(|grace_end| now < grace_end) {
        ShiftState::Active
    } else {
        ShiftState::Ended
    }
}

/// Resolves and classifies a single record.
///
/// An unresolvable span is logged and the record is classified as ended.
pub fn classify_record(
    record: &ShiftRecord,
    catalog: &ShiftTypeCatalog,
    now: NaiveDateTime,
) -> ClassifiedShift {
    let span = match resolve_record_span(record, catalog) {
        Ok(span) => Some(span),
        Err(err) => {
            warn!(shift_id = record.id, error = %err, "Span unresolvable, classifying as ended");
            None
        }
    };

    let state = classify(span.as_ref(), record.is_ended, now);
    debug!(shift_id = record.id, state = %state, "Classified shift");

    ClassifiedShift {
        record: record.clone(),
        span,
        state,
    }
}

/// Classifies every record in a pool, preserving input order.
pub fn classify_pool(
    records: &[ShiftRecord],
    catalog: &ShiftTypeCatalog,
    now: NaiveDateTime,
) -> Vec<ClassifiedShift> {
    records
        .iter()
        .map(|record| classify_record(record, catalog, now))
        .collect()
}
