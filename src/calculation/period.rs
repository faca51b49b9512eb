//! Reporting period boundaries.
//!
//! Weeks and months do not start at midnight: the working day rolls over at
//! 06:29, shortly before the earliest morning shift begins.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::models::ReportingPeriod;

/// The weekday and time of day at which a reporting week begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekAnchor {
    /// First day of the week.
    pub weekday: Weekday,
    /// Time on that day at which the week begins.
    pub time: NaiveTime,
}

/// Weeks start on Sunday at 06:29.
pub const WEEK_START: WeekAnchor = WeekAnchor {
    weekday: Weekday::Sun,
    time: match NaiveTime::from_hms_opt(6, 29, 0) {
        Some(time) => time,
        None => NaiveTime::MIN,
    },
};

/// Months start on the 1st at this time.
pub const MONTH_START_TIME: NaiveTime = match NaiveTime::from_hms_opt(6, 29, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Returns the most recent period boundary at or before `now`.
///
/// # Examples
///
/// ```
/// use shift_ledger::calculation::period_start;
/// use shift_ledger::models::ReportingPeriod;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
///
/// // Thursday 2026-01-15 -> Sunday 2026-01-11 06:29
/// assert_eq!(
///     period_start(ReportingPeriod::Week, at("2026-01-15 12:00:00")),
///     at("2026-01-11 06:29:00")
/// );
/// // Before 06:29 on the 1st still belongs to the previous month
/// assert_eq!(
///     period_start(ReportingPeriod::Month, at("2026-02-01 05:00:00")),
///     at("2026-01-01 06:29:00")
/// );
/// ```
pub fn period_start(period: ReportingPeriod, now: NaiveDateTime) -> NaiveDateTime {
    match period {
        ReportingPeriod::Week => week_start(now, WEEK_START),
        ReportingPeriod::Month => month_start(now, MONTH_START_TIME),
    }
}

fn week_start(now: NaiveDateTime, anchor: WeekAnchor) -> NaiveDateTime {
    let days_back = (7 + now.weekday().num_days_from_monday()
        - anchor.weekday.num_days_from_monday())
        % 7;
    let candidate = step_back(now.date(), days_back).and_time(anchor.time);

    if candidate <= now {
        candidate
    } else {
        step_back(candidate.date(), 7).and_time(anchor.time)
    }
}

fn month_start(now: NaiveDateTime, time: NaiveTime) -> NaiveDateTime {
    let first = now.date().with_day(1).unwrap_or(now.date());
    let candidate = first.and_time(time);

    if candidate <= now {
        candidate
    } else {
        first
            .checked_sub_months(Months::new(1))
            .unwrap_or(NaiveDate::MIN)
            .and_time(time)
    }
}

fn step_back(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}
