//! Shabbat premium split.
//!
//! Minutes of a span that fall inside the weekly Shabbat window (Friday
//! afternoon to Sunday early morning) are paid at the Shabbat rate; the
//! remainder at the base hourly rate.
//!
//! # Rate Selection
//!
//! The profile's `shabat_hourly_rate` applies when it is positive. Otherwise
//! Shabbat minutes are paid at the base rate × [`SHABBAT_MULTIPLIER`].

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ResolvedSpan, WorkplaceRateProfile};

/// Multiplier applied to the base rate when no Shabbat rate is configured.
pub const SHABBAT_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Hours bounding the Shabbat window.
///
/// The window opens on Friday at `start_hour` and closes on Sunday at
/// `end_hour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShabbatWindow {
    /// Hour on Friday at which the window opens.
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    /// Hour on Sunday at which the window closes.
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
}

fn default_start_hour() -> u32 {
    15
}

fn default_end_hour() -> u32 {
    5
}

impl Default for ShabbatWindow {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
        }
    }
}

impl ShabbatWindow {
    /// Checks that both hours are valid hours of the day.
    pub fn validate(&self) -> EngineResult<()> {
        self.opening_time()?;
        self.closing_time()?;
        Ok(())
    }

    fn opening_time(&self) -> EngineResult<NaiveTime> {
        NaiveTime::from_hms_opt(self.start_hour, 0, 0)
            .ok_or_else(|| EngineError::invalid_input("shabbat.start_hour", "must be 0-23"))
    }

    fn closing_time(&self) -> EngineResult<NaiveTime> {
        NaiveTime::from_hms_opt(self.end_hour, 0, 0)
            .ok_or_else(|| EngineError::invalid_input("shabbat.end_hour", "must be 0-23"))
    }

    /// The window opening on `friday`, as a span.
    fn occurrence(&self, friday: NaiveDate) -> EngineResult<ResolvedSpan> {
        let sunday = friday.checked_add_days(Days::new(2)).ok_or_else(|| {
            EngineError::invalid_input("shabbat", "window date out of range")
        })?;
        Ok(ResolvedSpan {
            start: friday.and_time(self.opening_time()?),
            end: sunday.and_time(self.closing_time()?),
        })
    }
}

/// A span's pay split into regular and Shabbat portions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanPay {
    /// Minutes outside the Shabbat window.
    pub regular_minutes: i64,
    /// Minutes inside the Shabbat window.
    pub shabbat_minutes: i64,
    /// The rate applied to Shabbat minutes.
    pub shabbat_rate: Decimal,
    /// Pay for regular minutes.
    pub regular_pay: Decimal,
    /// Pay for Shabbat minutes.
    pub shabbat_pay: Decimal,
    /// Regular plus Shabbat pay.
    pub total: Decimal,
}

/// Prices a span, paying the Shabbat premium for minutes inside the window.
///
/// # Examples
///
/// ```
/// use shift_ledger::calculation::{calculate_span_pay, ShabbatWindow};
/// use shift_ledger::models::{ResolvedSpan, WorkplaceRateProfile};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let profile = WorkplaceRateProfile {
///     hourly_rate: Decimal::new(40, 0),
///     overtime_hourly_rate: None,
///     shabat_hourly_rate: None,
/// };
///
/// // Friday 2026-01-16, 13:00 - 17:00: two regular hours, two Shabbat hours
/// let span = ResolvedSpan { start: at("2026-01-16 13:00:00"), end: at("2026-01-16 17:00:00") };
/// let pay = calculate_span_pay(&span, &profile, &ShabbatWindow::default()).unwrap();
///
/// assert_eq!(pay.shabbat_minutes, 120);
/// assert_eq!(pay.total, Decimal::new(200, 0));
/// ```
pub fn calculate_span_pay(
    span: &ResolvedSpan,
    profile: &WorkplaceRateProfile,
    window: &ShabbatWindow,
) -> EngineResult<SpanPay> {
    let total_minutes = span.duration_minutes().max(0);
    let shabbat_minutes = shabbat_overlap_minutes(span, window)?.min(total_minutes);
    let regular_minutes = total_minutes - shabbat_minutes;

    let shabbat_rate = profile
        .shabat_hourly_rate
        .filter(|rate| *rate > Decimal::ZERO)
        .unwrap_or(profile.hourly_rate * SHABBAT_MULTIPLIER);

    let regular_pay = minutes_to_hours(regular_minutes) * profile.hourly_rate;
    let shabbat_pay = minutes_to_hours(shabbat_minutes) * shabbat_rate;

    Ok(SpanPay {
        regular_minutes,
        shabbat_minutes,
        shabbat_rate,
        regular_pay,
        shabbat_pay,
        total: regular_pay + shabbat_pay,
    })
}

/// Sums the overlap of the span with every window occurrence it can touch.
fn shabbat_overlap_minutes(span: &ResolvedSpan, window: &ShabbatWindow) -> EngineResult<i64> {
    let mut friday = friday_on_or_before(span.start.date())
        .checked_sub_days(Days::new(7))
        .unwrap_or(NaiveDate::MIN);

    let mut minutes = 0;
    while friday.and_time(NaiveTime::MIN) < span.end {
        let occurrence = window.occurrence(friday)?;
        minutes += overlap(span, &occurrence);
        friday = match friday.checked_add_days(Days::new(7)) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(minutes)
}

fn overlap(a: &ResolvedSpan, b: &ResolvedSpan) -> i64 {
    let start: NaiveDateTime = a.start.max(b.start);
    let end: NaiveDateTime = a.end.min(b.end);
    if end > start {
        (end - start).num_minutes()
    } else {
        0
    }
}

fn friday_on_or_before(date: NaiveDate) -> NaiveDate {
    // Friday is 4 days from Monday
    let days_back = (date.weekday().num_days_from_monday() + 7 - 4) % 7;
    date.checked_sub_days(Days::new(u64::from(days_back)))
        .unwrap_or(NaiveDate::MIN)
}

fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}
