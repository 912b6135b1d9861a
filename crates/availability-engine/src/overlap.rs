//! Overlap search between two users' availability.
//!
//! Performs a per-day pairwise comparison of merged intervals. Unlike
//! merging, intervals that only touch (`a.end == b.start`) do NOT overlap:
//! a zero-width contact is not a usable session slot.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::day::Day;
use crate::interval::AvailabilitySet;
use crate::timecodec::TimePoint;

/// A window during which both sides are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OverlapRecord {
    pub day: Day,
    pub start: TimePoint,
    pub end: TimePoint,
    pub duration_minutes: u32,
}

/// All overlap windows with one counterpart, aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapSummary<K> {
    /// Caller-supplied identity of the counterpart (e.g. an email).
    pub id: K,
    /// Sum of `duration_minutes` over every record.
    pub total_minutes: u32,
    /// Records grouped by day. Only days with at least one record appear.
    pub overlaps_by_day: BTreeMap<Day, Vec<OverlapRecord>>,
}

/// Find every window where `mine` and `theirs` are both available.
///
/// Days are visited in canonical order; within a day, `mine` drives the outer
/// loop. Each side is already disjoint, so the records are disjoint too and
/// are returned without any post-merge.
pub fn intersect(mine: &AvailabilitySet, theirs: &AvailabilitySet) -> Vec<OverlapRecord> {
    let mut records = Vec::new();

    for (day, my_intervals) in mine.days() {
        let their_intervals = theirs.day(day);
        if their_intervals.is_empty() {
            continue;
        }

        for a in my_intervals {
            for b in their_intervals {
                let start = a.start.max(b.start);
                let end = a.end.min(b.end);
                // Strict: touching at a boundary yields nothing.
                if end > start {
                    records.push(OverlapRecord {
                        day,
                        start,
                        end,
                        duration_minutes: u32::from(end.minutes() - start.minutes()),
                    });
                }
            }
        }
    }

    records
}

/// Summarize overlap between `mine` and each classmate.
///
/// Every classmate gets an entry, including those with no overlap
/// (`total_minutes == 0`). The result is ordered by `total_minutes`
/// descending; equal totals keep their input order.
pub fn overlap_summary<'a, K, I>(mine: &AvailabilitySet, classmates: I) -> Vec<OverlapSummary<K>>
where
    I: IntoIterator<Item = (K, &'a AvailabilitySet)>,
{
    let mut summaries: Vec<OverlapSummary<K>> = classmates
        .into_iter()
        .map(|(id, theirs)| {
            let records = intersect(mine, theirs);
            let total_minutes = records.iter().map(|r| r.duration_minutes).sum();

            let mut overlaps_by_day: BTreeMap<Day, Vec<OverlapRecord>> = BTreeMap::new();
            for record in records {
                overlaps_by_day.entry(record.day).or_default().push(record);
            }

            OverlapSummary {
                id,
                total_minutes,
                overlaps_by_day,
            }
        })
        .collect();

    // `sort_by` is stable, which gives the input-order tie-break.
    summaries.sort_by(|a, b| b.total_minutes.cmp(&a.total_minutes));
    summaries
}
