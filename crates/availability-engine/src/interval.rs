//! Intervals and the per-user availability set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::error::{AvailabilityError, Result};
use crate::timecodec::TimePoint;

/// A half-open window `[start, end)` on one day. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    pub day: Day,
    pub start: TimePoint,
    pub end: TimePoint,
}

impl Interval {
    /// Build an interval, rejecting zero-length and inverted windows.
    ///
    /// # Errors
    /// Returns `AvailabilityError::Range` if `end <= start`.
    pub fn new(day: Day, start: TimePoint, end: TimePoint) -> Result<Self> {
        if end <= start {
            return Err(AvailabilityError::range("End time must be after start time"));
        }
        Ok(Interval { day, start, end })
    }

    pub fn duration_minutes(&self) -> u32 {
        u32::from(self.end.minutes() - self.start.minutes())
    }

    /// Sort key for the flat cross-day listing: canonical day, then start.
    pub(crate) fn listing_key(&self) -> (usize, TimePoint) {
        (self.day.index(), self.start)
    }
}

#[derive(Deserialize)]
struct RawInterval {
    day: Day,
    start: TimePoint,
    end: TimePoint,
}

impl TryFrom<RawInterval> for Interval {
    type Error = AvailabilityError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.day, raw.start, raw.end)
    }
}

/// A user's weekly availability: per day, a list of intervals sorted by start,
/// pairwise disjoint and non-touching.
///
/// The only mutations are merge-insert ([`crate::merge::merge_insert`]) and
/// listing-index removal ([`crate::weekly::remove_listed`]); both return a new
/// set and leave the input untouched.
///
/// On disk the set is a flat list of intervals. Deserializing folds that list
/// back through merge-insert, so the invariant holds even for hand-edited data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Interval>", into = "Vec<Interval>")]
pub struct AvailabilitySet {
    by_day: BTreeMap<Day, Vec<Interval>>,
}

impl AvailabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }

    /// Total number of stored intervals across all days.
    pub fn len(&self) -> usize {
        self.by_day.values().map(Vec::len).sum()
    }

    /// The intervals stored for `day` (empty if none).
    pub fn day(&self, day: Day) -> &[Interval] {
        self.by_day.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days that have at least one interval, in canonical order.
    pub fn days(&self) -> impl Iterator<Item = (Day, &[Interval])> {
        self.by_day.iter().map(|(d, v)| (*d, v.as_slice()))
    }

    /// Every interval, Monday first, ascending start within a day.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.by_day.values().flatten()
    }

    /// Replace one day's bucket. Empty buckets are dropped so `days()` only
    /// reports populated days.
    pub(crate) fn set_day(&mut self, day: Day, intervals: Vec<Interval>) {
        if intervals.is_empty() {
            self.by_day.remove(&day);
        } else {
            self.by_day.insert(day, intervals);
        }
    }

    /// In-place merge-insert of an already validated interval.
    pub(crate) fn insert(&mut self, interval: Interval) {
        let mut bucket = self.day(interval.day).to_vec();
        bucket.push(interval);
        self.set_day(interval.day, crate::merge::fold_day(bucket));
    }
}

impl From<Vec<Interval>> for AvailabilitySet {
    fn from(intervals: Vec<Interval>) -> Self {
        intervals.into_iter().collect()
    }
}

impl From<AvailabilitySet> for Vec<Interval> {
    fn from(set: AvailabilitySet) -> Self {
        set.by_day.into_values().flatten().collect()
    }
}

impl FromIterator<Interval> for AvailabilitySet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        let mut set = AvailabilitySet::new();
        for interval in iter {
            set.insert(interval);
        }
        set
    }
}
