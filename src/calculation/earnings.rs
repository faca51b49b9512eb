//! Earnings calculation.
//!
//! This module costs a single shift from its base hours, overtime allotment
//! and tip. Overtime is billed at the rate entered on the shift, or at the
//! supplied fallback when the shift carries none. Tips are reported next to
//! the total, never inside it.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{EarningsBreakdown, EarningsInput, ShiftDraft};

/// Computes the earnings for one shift.
///
/// # Arguments
///
/// * `input` - Hours, rates and tip for the shift
///
/// # Returns
///
/// An [`EarningsBreakdown`], or:
/// * [`EngineError::InvalidInput`] for negative hours, rates or tip
/// * [`EngineError::RateResolution`] when overtime hours are present but no
///   positive overtime rate can be resolved
///
/// # Examples
///
/// ```
/// use shift_ledger::calculation::compute_earnings;
/// use shift_ledger::models::EarningsInput;
/// use rust_decimal::Decimal;
///
/// let input = EarningsInput {
///     base_hours: Decimal::new(8, 0),
///     hourly_rate: Decimal::new(50, 0),
///     overtime_hours: Decimal::new(2, 0),
///     overtime_rate: Some(Decimal::new(75, 0)),
///     tip_amount: Decimal::new(30, 0),
///     ..Default::default()
/// };
///
/// let breakdown = compute_earnings(&input).unwrap();
/// assert_eq!(breakdown.total, Decimal::new(550, 0));
/// assert_eq!(breakdown.tip_earnings, Decimal::new(30, 0));
/// assert_eq!(breakdown.grand_total(), Decimal::new(580, 0));
/// ```
pub fn compute_earnings(input: &EarningsInput) -> EngineResult<EarningsBreakdown> {
    ensure_non_negative("base_hours", input.base_hours)?;
    ensure_non_negative("hourly_rate", input.hourly_rate)?;
    ensure_non_negative("overtime_hours", input.overtime_hours)?;
    ensure_non_negative("tip_amount", input.tip_amount)?;
    if let Some(rate) = input.overtime_rate {
        ensure_non_negative("overtime_rate", rate)?;
    }

    let base_earnings = input.base_hours * input.hourly_rate;

    let (overtime_earnings, effective_overtime_rate) = if input.overtime_hours > Decimal::ZERO {
        let rate = resolve_overtime_rate(input.overtime_rate, input.overtime_rate_fallback)
            .ok_or(EngineError::RateResolution {
                shift_id: input.shift_id,
                overtime_hours: input.overtime_hours,
            })?;
        (input.overtime_hours * rate, Some(rate))
    } else {
        (Decimal::ZERO, None)
    };

    let total = base_earnings + overtime_earnings;

    debug!(
        shift_id = input.shift_id,
        base = %base_earnings,
        overtime = %overtime_earnings,
        total = %total,
        "Computed earnings"
    );

    Ok(EarningsBreakdown {
        base_earnings,
        overtime_earnings,
        effective_overtime_rate,
        tip_earnings: input.tip_amount,
        total,
    })
}

/// Checks a draft before it is persisted.
///
/// Rejects negative hours, rates and tips, and overtime hours for which no
/// rate can be resolved from the draft or from `overtime_rate_fallback`.
///
/// # Examples
///
/// ```
/// use shift_ledger::calculation::validate_draft;
/// use shift_ledger::models::ShiftDraft;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let draft = ShiftDraft {
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     shift_type_code: Some("MORNING".to_string()),
///     start_time: None,
///     end_time: None,
///     overtime_hours: Decimal::new(1, 0),
///     overtime_rate: None,
///     tip_amount: None,
/// };
///
/// assert!(validate_draft(&draft, None).is_err());
/// assert!(validate_draft(&draft, Some(Decimal::new(60, 0))).is_ok());
/// ```
pub fn validate_draft(
    draft: &ShiftDraft,
    overtime_rate_fallback: Option<Decimal>,
) -> EngineResult<()> {
    ensure_non_negative("overtime_hours", draft.overtime_hours)?;
    if let Some(rate) = draft.overtime_rate {
        ensure_non_negative("overtime_rate", rate)?;
    }
    if let Some(tip) = draft.tip_amount {
        ensure_non_negative("tip_amount", tip)?;
    }

    if draft.overtime_hours > Decimal::ZERO
        && resolve_overtime_rate(draft.overtime_rate, overtime_rate_fallback).is_none()
    {
        return Err(EngineError::invalid_input(
            "overtime_rate",
            "overtime hours require an overtime rate",
        ));
    }

    Ok(())
}

/// Picks the shift's own rate, then the fallback. Zero counts as unset.
fn resolve_overtime_rate(explicit: Option<Decimal>, fallback: Option<Decimal>) -> Option<Decimal> {
    explicit
        .filter(|rate| *rate > Decimal::ZERO)
        .or_else(|| fallback.filter(|rate| *rate > Decimal::ZERO))
}

fn ensure_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(field, "must not be negative"));
    }
    Ok(())
}
