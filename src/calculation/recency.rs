//! Recency aggregation.
//!
//! Builds the dashboard's recent activity list from a pool of classified
//! shifts: at most one active shift first, then the most recent others.
//! The output depends only on the pool's contents, never on its order.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::{ClassifiedShift, ShiftState};

/// Number of non-active shifts shown by default.
pub const DEFAULT_DISPLAY_COUNT: usize = 3;

/// Merges and orders a pool into the recent activity list.
///
/// # Algorithm
///
/// 1. Partition into active and other shifts. If several are active, the
///    one with the latest start (ties: higher id) is kept as active and the
///    rest are relabelled [`ShiftState::Ended`].
/// 2. Sort the others by anchor descending, ties by id descending.
/// 3. Keep the first `display_count` of them.
/// 4. Emit the active shift, if any, followed by the kept others.
///
/// The result holds at most `display_count + 1` entries.
///
/// # Examples
///
/// ```
/// use shift_ledger::calculation::{aggregate_recent, DEFAULT_DISPLAY_COUNT};
///
/// let recent = aggregate_recent(&[], DEFAULT_DISPLAY_COUNT);
/// assert!(recent.is_empty());
/// ```
pub fn aggregate_recent(pool: &[ClassifiedShift], display_count: usize) -> Vec<ClassifiedShift> {
    let (mut active, mut others): (Vec<ClassifiedShift>, Vec<ClassifiedShift>) =
        pool.iter().cloned().partition(ClassifiedShift::is_active);

    active.sort_by(most_recent_first);
    let mut active = active.into_iter();
    let current = active.next();

    for mut demoted in active {
        debug!(shift_id = demoted.record.id, "Demoting extra active shift to ended");
        demoted.state = ShiftState::Ended;
        others.push(demoted);
    }

    others.sort_by(most_recent_first);
    others.truncate(display_count);

    debug!(
        active = ?current.as_ref().map(|c| c.record.id),
        others = others.len(),
        "Aggregated recent shifts"
    );

    current.into_iter().chain(others).collect()
}

/// Orders by anchor descending, then id descending.
fn most_recent_first(a: &ClassifiedShift, b: &ClassifiedShift) -> Ordering {
    b.anchor()
        .cmp(&a.anchor())
        .then_with(|| b.record.id.cmp(&a.record.id))
}
