//! Free-slot calculation.
//!
//! Given the business-hours window and the intervals already booked on a day,
//! [`free_slots`] returns the gaps left in the window. The result only feeds
//! error messages; it is never stored.

use crate::interval::Interval;

/// Returns the free sub-intervals of `window`, ordered by start time.
///
/// Booked intervals are swept in start order with a cursor that starts at
/// the window opening. Booked intervals reaching outside the window are
/// clipped to it, and an interval nested inside an earlier one never moves
/// the cursor backwards.
pub fn free_slots(window: Interval, booked: &[Interval]) -> Vec<Interval> {
    let mut sorted = booked.to_vec();
    sorted.sort_by_key(Interval::start);

    let mut free = Vec::new();
    let mut cursor = window.start();

    for slot in &sorted {
        let start = slot.start().min(window.end());
        if cursor < start {
            free.push(Interval::new_unchecked(cursor, start));
        }
        if slot.end() > cursor {
            cursor = slot.end();
        }
    }

    if cursor < window.end() {
        free.push(Interval::new_unchecked(cursor, window.end()));
    }

    free
}
