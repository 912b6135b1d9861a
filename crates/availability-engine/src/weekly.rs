//! Display projections of an availability set.
//!
//! - [`project`] — fixed Monday–Sunday view in 12-hour format
//! - [`listing`] — flat, cross-day sorted list addressed by 1-based index
//! - [`remove_listed`] — remove the interval at a listing index
//!
//! Listing indices are a view, not an identity: they are recomputed on every
//! call and shift after any mutation.

use std::collections::BTreeMap;

use crate::day::Day;
use crate::error::{AvailabilityError, Result};
use crate::interval::{AvailabilitySet, Interval};
use crate::timecodec::format12;

/// `(start, end)` formatted for display, e.g. `("9:00 AM", "11:30 AM")`.
pub type DisplayWindow = (String, String);

/// Project a set onto all seven days. Every day is present as a key; days
/// without availability map to an empty list.
pub fn project(set: &AvailabilitySet) -> BTreeMap<Day, Vec<DisplayWindow>> {
    Day::ALL
        .into_iter()
        .map(|day| {
            let windows: Vec<DisplayWindow> = set
                .day(day)
                .iter()
                .map(|i| (format12(i.start), format12(i.end)))
                .collect();
            (day, windows)
        })
        .collect()
}

/// All intervals sorted by `(canonical day index, start)`.
pub fn listing(set: &AvailabilitySet) -> Vec<Interval> {
    let mut all: Vec<Interval> = set.iter().copied().collect();
    all.sort_by_key(Interval::listing_key);
    all
}

/// Remove the interval at 1-based `index` of a freshly computed [`listing`].
///
/// The target is matched by value against the stored intervals.
///
/// # Errors
/// Returns `AvailabilityError::Range` if `index` is 0 or past the end.
pub fn remove_listed(set: &AvailabilitySet, index: usize) -> Result<AvailabilitySet> {
    let current = listing(set);
    let target = index
        .checked_sub(1)
        .and_then(|i| current.get(i))
        .ok_or_else(|| AvailabilityError::range("Index out of range"))?;

    let mut updated = set.clone();
    let remaining: Vec<Interval> = set
        .day(target.day)
        .iter()
        .filter(|i| *i != target)
        .copied()
        .collect();
    updated.set_day(target.day, remaining);
    Ok(updated)
}
