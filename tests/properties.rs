//! Property tests for span resolution, classification and recency.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;
use rust_decimal::Decimal;

use shift_ledger::calculation::{
    GRACE_WINDOW_MINUTES, aggregate_recent, classify, resolve_span,
};
use shift_ledger::models::{ClassifiedShift, ResolvedSpan, ShiftRecord, ShiftState, TimeOfDay};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn record(id: u64, date: NaiveDate) -> ShiftRecord {
    ShiftRecord {
        id,
        date,
        shift_type_code: None,
        start_time: None,
        end_time: None,
        overtime_hours: Decimal::ZERO,
        overtime_rate: None,
        tip_amount: Decimal::ZERO,
        is_ended: false,
        base_hours: Decimal::ZERO,
    }
}

fn span_strategy() -> impl Strategy<Value = ResolvedSpan> {
    (0u64..60, 0i64..(24 * 60), 1i64..(16 * 60)).prop_map(|(day, start_minute, length)| {
        let start = base_date()
            .checked_add_days(Days::new(day))
            .unwrap()
            .and_time(NaiveTime::MIN)
            + Duration::minutes(start_minute);
        ResolvedSpan {
            start,
            end: start + Duration::minutes(length),
        }
    })
}

/// Pools with unique ids; states are arbitrary, at most a few active.
fn pool_strategy() -> impl Strategy<Value = Vec<ClassifiedShift>> {
    prop::collection::vec((span_strategy(), 0u8..4), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(index, (span, state))| ClassifiedShift {
                record: record(index as u64 + 1, span.start.date()),
                span: Some(span),
                state: match state {
                    0 => ShiftState::Active,
                    1 => ShiftState::Scheduled,
                    _ => ShiftState::Ended,
                },
            })
            .collect()
    })
}

fn ids(shifts: &[ClassifiedShift]) -> Vec<(u64, ShiftState)> {
    shifts.iter().map(|s| (s.record.id, s.state)).collect()
}

proptest! {
    #[test]
    fn wrapped_end_is_one_day_after_same_day_end(
        start_minute in 0u32..(24 * 60),
        end_minute in 0u32..(24 * 60),
    ) {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let start = TimeOfDay::hm(start_minute / 60, start_minute % 60);
        let end = TimeOfDay::hm(end_minute / 60, end_minute % 60);

        let span = resolve_span(1, date, Some(&start), Some(&end), None).unwrap();
        let same_day_end = date.and_time(end.normalize().unwrap());

        prop_assert!(span.end > span.start);
        if end_minute <= start_minute {
            prop_assert_eq!(span.end, same_day_end + Duration::days(1));
        } else {
            prop_assert_eq!(span.end, same_day_end);
        }
    }

    #[test]
    fn shift_is_active_at_its_start(span in span_strategy()) {
        prop_assert_eq!(classify(Some(&span), false, span.start), ShiftState::Active);
    }

    #[test]
    fn grace_window_closes_exactly(span in span_strategy()) {
        let boundary: NaiveDateTime = span.end + Duration::minutes(GRACE_WINDOW_MINUTES);

        prop_assert_eq!(classify(Some(&span), false, boundary), ShiftState::Ended);
        prop_assert_eq!(
            classify(Some(&span), false, boundary - Duration::seconds(1)),
            ShiftState::Active
        );
    }

    #[test]
    fn explicit_end_always_wins(span in span_strategy(), offset in -600i64..600) {
        let now = span.start + Duration::minutes(offset);
        prop_assert_eq!(classify(Some(&span), true, now), ShiftState::Ended);
    }

    #[test]
    fn recent_list_ignores_input_order(pool in pool_strategy(), display_count in 0usize..5) {
        let mut reversed = pool.clone();
        reversed.reverse();

        let forward = aggregate_recent(&pool, display_count);
        let backward = aggregate_recent(&reversed, display_count);

        prop_assert_eq!(ids(&forward), ids(&backward));
    }

    #[test]
    fn recent_list_is_bounded_with_one_active_first(
        pool in pool_strategy(),
        display_count in 0usize..5,
    ) {
        let recent = aggregate_recent(&pool, display_count);

        prop_assert!(recent.len() <= display_count + 1);
        let active: Vec<_> = recent.iter().filter(|s| s.is_active()).collect();
        prop_assert!(active.len() <= 1);
        if !active.is_empty() {
            prop_assert!(recent[0].is_active());
        }
    }
}
