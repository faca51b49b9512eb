//! Core data models for the shift ledger engine.
//!
//! This module contains all the domain models used throughout the engine.

mod classification;
mod earnings;
mod rate_profile;
mod shift;
mod shift_type;
mod summary;
mod time_of_day;

pub use classification::{ClassifiedShift, ResolvedSpan, ShiftState};
pub use earnings::{EarningsBreakdown, EarningsInput};
pub use rate_profile::WorkplaceRateProfile;
pub use shift::{ShiftDraft, ShiftRecord};
pub use shift_type::{ShiftIcon, ShiftKind, ShiftPalette, ShiftTypeCatalog, ShiftTypeDefinition};
pub use summary::{DashboardSummary, PeriodSummary, ReportingPeriod};
pub use time_of_day::TimeOfDay;
