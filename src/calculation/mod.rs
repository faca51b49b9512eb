//! Calculation logic for the shift ledger engine.
//!
//! This module contains the pure, clock-free functions that derive figures
//! from shift records: span resolution across midnight, state classification,
//! per-shift earnings, the recent activity list, week and month summaries,
//! the Shabbat premium split and weekly batch planning.
//!
//! Every function that depends on the current time takes it as an explicit
//! `now` argument.

mod classifier;
mod earnings;
mod period;
mod recency;
mod shabbat;
mod span;
mod summary;
mod weekly;

pub use classifier::{GRACE_WINDOW_MINUTES, classify, classify_pool, classify_record};
pub use earnings::{compute_earnings, validate_draft};
pub use period::{MONTH_START_TIME, WEEK_START, WeekAnchor, period_start};
pub use recency::{DEFAULT_DISPLAY_COUNT, aggregate_recent};
pub use shabbat::{SHABBAT_MULTIPLIER, ShabbatWindow, SpanPay, calculate_span_pay};
pub use span::{net_worked_hours, resolve_record_span, resolve_span};
pub use summary::{project_dashboard, project_summary};
pub use weekly::{WEEK_DAYS, plan_week};
