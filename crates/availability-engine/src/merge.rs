//! Merge-on-insert for weekly availability.
//!
//! Each day's bucket is kept as a minimal sorted set: overlapping intervals
//! are fused, and so are intervals that merely touch (`end == next.start`),
//! so contiguous study blocks read as one block.

use crate::day::Day;
use crate::error::Result;
use crate::interval::{AvailabilitySet, Interval};
use crate::timecodec::TimePoint;

/// Insert `[start, end)` on `day` into a copy of `existing` and re-merge that
/// day. Other days are carried over unchanged.
///
/// # Errors
/// Returns `AvailabilityError::Range` if `end <= start`. `existing` is never
/// modified, so a failed insert leaves the caller's state as it was.
pub fn merge_insert(
    existing: &AvailabilitySet,
    day: Day,
    start: TimePoint,
    end: TimePoint,
) -> Result<AvailabilitySet> {
    let interval = Interval::new(day, start, end)?;
    let mut merged = existing.clone();
    merged.insert(interval);
    Ok(merged)
}

/// Sort one day's intervals by start and fuse every overlapping or touching
/// run into a single interval.
///
/// All intervals must share the same day.
pub(crate) fn fold_day(mut intervals: Vec<Interval>) -> Vec<Interval> {
    if intervals.is_empty() {
        return intervals;
    }

    intervals.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                // Overlapping or touching: extend the running interval.
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}
