//! Workplace rate profile.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Resolved pay rates for the worker's currently selected workplace.
///
/// # Example
///
/// ```
/// use shift_ledger::models::WorkplaceRateProfile;
/// use rust_decimal::Decimal;
///
/// let profile = WorkplaceRateProfile {
///     hourly_rate: Decimal::new(51, 0),
///     overtime_hourly_rate: Some(Decimal::new(6375, 2)),
///     shabat_hourly_rate: None,
/// };
/// assert_eq!(profile.overtime_rate_fallback(), Some(Decimal::new(6375, 2)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkplaceRateProfile {
    /// Base hourly rate.
    pub hourly_rate: Decimal,
    /// Overtime hourly rate, used when a shift carries none of its own.
    #[serde(default)]
    pub overtime_hourly_rate: Option<Decimal>,
    /// Hourly rate for hours inside the Shabbat window.
    #[serde(default)]
    pub shabat_hourly_rate: Option<Decimal>,
}

impl WorkplaceRateProfile {
    /// The overtime rate applied to shifts without their own rate.
    ///
    /// This is the only place the fallback is derived. A zero or negative
    /// configured rate counts as unset.
    pub fn overtime_rate_fallback(&self) -> Option<Decimal> {
        self.overtime_hourly_rate.filter(|rate| *rate > Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_overtime_rate_is_not_a_fallback() {
        let profile = WorkplaceRateProfile {
            hourly_rate: Decimal::new(40, 0),
            overtime_hourly_rate: Some(Decimal::ZERO),
            shabat_hourly_rate: None,
        };
        assert_eq!(profile.overtime_rate_fallback(), None);
    }

    #[test]
    fn test_missing_overtime_rate_is_not_a_fallback() {
        let json = r#"{ "hourly_rate": "40" }"#;
        let profile: WorkplaceRateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.overtime_rate_fallback(), None);
        assert_eq!(profile.shabat_hourly_rate, None);
    }
}
