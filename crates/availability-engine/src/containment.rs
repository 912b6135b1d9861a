//! Fits-within checks used to gate session proposals.

use crate::day::Day;
use crate::error::{AvailabilityError, Result};
use crate::interval::AvailabilitySet;
use crate::timecodec::TimePoint;

/// True iff a single stored interval on `day` covers all of `[start, end)`.
///
/// A window that straddles a gap is rejected even when the union of the
/// surrounding intervals would cover it; windows are never clipped.
pub fn fits_within(set: &AvailabilitySet, day: Day, start: TimePoint, end: TimePoint) -> bool {
    set.day(day)
        .iter()
        .any(|i| i.start <= start && end <= i.end)
}

/// [`fits_within`] as a hard gate.
///
/// # Errors
/// Returns `AvailabilityError::Range` with `"{who} not available for entire
/// window"` when the window does not fit.
pub fn ensure_fits_within(
    set: &AvailabilitySet,
    day: Day,
    start: TimePoint,
    end: TimePoint,
    who: &str,
) -> Result<()> {
    if fits_within(set, day, start, end) {
        Ok(())
    } else {
        Err(AvailabilityError::range(format!(
            "{who} not available for entire window"
        )))
    }
}
