//! Earnings input and breakdown models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ShiftRecord, WorkplaceRateProfile};

/// Everything needed to cost a single shift.
///
/// # Example
///
/// ```
/// use shift_ledger::models::EarningsInput;
/// use rust_decimal::Decimal;
///
/// let input = EarningsInput {
///     base_hours: Decimal::new(8, 0),
///     hourly_rate: Decimal::new(50, 0),
///     ..Default::default()
/// };
/// assert_eq!(input.overtime_hours, Decimal::ZERO);
/// assert!(input.overtime_rate_fallback.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsInput {
    /// Id of the shift being costed, 0 for standalone computations.
    #[serde(default)]
    pub shift_id: u64,
    /// Billed base hours.
    pub base_hours: Decimal,
    /// Base hourly rate.
    pub hourly_rate: Decimal,
    /// Overtime hours.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Overtime rate entered on the shift.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// Rate used when the shift carries no overtime rate.
    #[serde(default)]
    pub overtime_rate_fallback: Option<Decimal>,
    /// Gratuity.
    #[serde(default)]
    pub tip_amount: Decimal,
}

impl EarningsInput {
    /// Builds the input for a stored shift under a rate profile.
    pub fn for_shift(record: &ShiftRecord, profile: &WorkplaceRateProfile) -> Self {
        Self {
            shift_id: record.id,
            base_hours: record.base_hours,
            hourly_rate: profile.hourly_rate,
            overtime_hours: record.overtime_hours,
            overtime_rate: record.overtime_rate,
            overtime_rate_fallback: profile.overtime_rate_fallback(),
            tip_amount: record.tip_amount,
        }
    }
}

/// The components of a shift's earnings.
///
/// `total` covers base and overtime pay only; tips are reported alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsBreakdown {
    /// Base hours × hourly rate.
    pub base_earnings: Decimal,
    /// Overtime hours × effective overtime rate.
    pub overtime_earnings: Decimal,
    /// The overtime rate that was applied, if overtime was costed.
    pub effective_overtime_rate: Option<Decimal>,
    /// Gratuity, kept outside `total`.
    pub tip_earnings: Decimal,
    /// Expected salary for the shift: base plus overtime.
    pub total: Decimal,
}

impl EarningsBreakdown {
    /// Returns `total` plus tips.
    pub fn grand_total(&self) -> Decimal {
        self.total + self.tip_earnings
    }
}
