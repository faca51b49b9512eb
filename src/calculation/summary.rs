//! Period summary projection.
//!
//! Folds the shifts that fall inside a reporting period into total hours,
//! projected salary and tips. A shift belongs to a period when its anchor
//! lies between the period start and `now`, both inclusive.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::debug;

use super::earnings::compute_earnings;
use super::period::period_start;
use super::span::resolve_record_span;
use crate::error::EngineResult;
use crate::models::{
    DashboardSummary, EarningsInput, PeriodSummary, ReportingPeriod, ShiftRecord,
    ShiftTypeCatalog, WorkplaceRateProfile,
};

/// Projects the totals for one period.
///
/// # Arguments
///
/// * `pool` - Candidate shifts; those outside the period are skipped
/// * `catalog` - Shift types, used to resolve spans for the anchor
/// * `profile` - Rates used to cost each shift
/// * `period_start` - First instant of the period
/// * `now` - The evaluation instant, closing the period
///
/// # Returns
///
/// The [`PeriodSummary`], or the first earnings error encountered. Rate
/// resolution failures are never folded in as zero.
///
/// # Examples
///
/// ```
/// use shift_ledger::calculation::project_summary;
/// use shift_ledger::models::{ShiftTypeCatalog, WorkplaceRateProfile};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let profile = WorkplaceRateProfile {
///     hourly_rate: Decimal::new(51, 0),
///     overtime_hourly_rate: None,
///     shabat_hourly_rate: None,
/// };
///
/// let summary = project_summary(
///     &[],
///     &ShiftTypeCatalog::default(),
///     &profile,
///     at("2026-01-11 06:29:00"),
///     at("2026-01-15 12:00:00"),
/// )
/// .unwrap();
/// assert!(summary.is_empty());
/// ```
pub fn project_summary(
    pool: &[ShiftRecord],
    catalog: &ShiftTypeCatalog,
    profile: &WorkplaceRateProfile,
    period_start: NaiveDateTime,
    now: NaiveDateTime,
) -> EngineResult<PeriodSummary> {
    fold_period(&anchor_pool(pool, catalog), profile, period_start, now)
}

/// Projects the current week and month.
///
/// This is where period boundaries are derived from `now`. Each record's
/// span is resolved once and shared by both periods.
pub fn project_dashboard(
    pool: &[ShiftRecord],
    catalog: &ShiftTypeCatalog,
    profile: &WorkplaceRateProfile,
    now: NaiveDateTime,
) -> EngineResult<DashboardSummary> {
    let anchored = anchor_pool(pool, catalog);
    let week = fold_period(
        &anchored,
        profile,
        period_start(ReportingPeriod::Week, now),
        now,
    )?;
    let month = fold_period(
        &anchored,
        profile,
        period_start(ReportingPeriod::Month, now),
        now,
    )?;

    Ok(DashboardSummary { week, month })
}

/// Pairs each record with its anchor: the span start, or midnight of its
/// date when the span is unresolvable.
fn anchor_pool<'a>(
    pool: &'a [ShiftRecord],
    catalog: &ShiftTypeCatalog,
) -> Vec<(NaiveDateTime, &'a ShiftRecord)> {
    pool.iter()
        .map(|record| {
            let anchor = resolve_record_span(record, catalog).map_or_else(
                |_| record.date.and_time(NaiveTime::MIN),
                |span| span.start,
            );
            (anchor, record)
        })
        .collect()
}

fn fold_period(
    anchored: &[(NaiveDateTime, &ShiftRecord)],
    profile: &WorkplaceRateProfile,
    period_start: NaiveDateTime,
    now: NaiveDateTime,
) -> EngineResult<PeriodSummary> {
    let mut summary = PeriodSummary {
        period_start,
        period_end: now,
        shift_count: 0,
        period_hours: Decimal::ZERO,
        projected_salary: Decimal::ZERO,
        total_tips: Decimal::ZERO,
    };

    for &(anchor, record) in anchored {
        if anchor < period_start || anchor > now {
            continue;
        }

        let earnings = compute_earnings(&EarningsInput::for_shift(record, profile))?;

        summary.shift_count += 1;
        summary.period_hours += record.total_hours();
        summary.projected_salary += earnings.total;
        summary.total_tips += record.tip_amount;
    }

    debug!(
        period_start = %period_start,
        shifts = summary.shift_count,
        salary = %summary.projected_salary,
        "Projected period summary"
    );

    Ok(summary)
}
