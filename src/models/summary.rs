//! Period summary models.
//!
//! This module contains the [`PeriodSummary`] and [`DashboardSummary`] types
//! produced by the summary projector.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A reporting period for dashboard totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingPeriod {
    /// The current week.
    Week,
    /// The current month.
    Month,
}

/// Aggregate figures over the shifts of one reporting period.
///
/// # Example
///
/// ```
/// use shift_ledger::models::PeriodSummary;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let summary = PeriodSummary {
///     period_start: NaiveDateTime::parse_from_str("2026-01-11 06:29:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     period_end: NaiveDateTime::parse_from_str("2026-01-15 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     shift_count: 0,
///     period_hours: Decimal::ZERO,
///     projected_salary: Decimal::ZERO,
///     total_tips: Decimal::ZERO,
/// };
/// assert!(summary.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// First instant of the period (inclusive).
    pub period_start: NaiveDateTime,
    /// Evaluation instant closing the period (inclusive).
    pub period_end: NaiveDateTime,
    /// Number of shifts counted.
    pub shift_count: usize,
    /// Base plus overtime hours.
    pub period_hours: Decimal,
    /// Sum of each shift's earnings total, tips excluded.
    pub projected_salary: Decimal,
    /// Sum of tips.
    pub total_tips: Decimal,
}

impl PeriodSummary {
    /// Returns `true` if no shift fell in the period.
    pub fn is_empty(&self) -> bool {
        self.shift_count == 0
    }
}

/// Week and month totals for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Totals since the start of the current week.
    pub week: PeriodSummary,
    /// Totals since the start of the current month.
    pub month: PeriodSummary,
}
