//! Weekly availability for a profile: add, list, remove and the 7-day view.

use std::collections::BTreeMap;

use availability_engine::weekly::DisplayWindow;
use availability_engine::{
    listing, merge_insert, normalize_day, parse, project, remove_listed, Day, Interval,
};

use crate::error::Result;
use crate::store::AvailabilityStore;

/// Availability operations over any [`AvailabilityStore`].
///
/// Each call loads the user's set, applies one engine operation and saves the
/// result. A failing operation saves nothing.
#[derive(Debug, Clone)]
pub struct AvailabilityService<S> {
    store: S,
}

impl<S: AvailabilityStore> AvailabilityService<S> {
    pub fn new(store: S) -> Self {
        AvailabilityService { store }
    }

    /// Add a window from raw day/time strings, merging it into the day.
    ///
    /// Returns the full listing after the merge.
    pub fn add_slot(
        &self,
        email: &str,
        day: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<Interval>> {
        let day = normalize_day(day)?;
        let slot = Interval::new(day, parse(start)?, parse(end)?)?;
        let (start, end) = (slot.start, slot.end);

        let current = self.store.load_availability(email)?;
        let updated = merge_insert(&current, day, start, end)?;
        self.store.save_availability(email, &updated)?;

        tracing::info!(%email, %day, %start, %end, "added availability");
        Ok(listing(&updated))
    }

    /// The flat listing, Monday first. Positions are what [`Self::remove_slot`]
    /// takes, counting from 1.
    pub fn list_slots(&self, email: &str) -> Result<Vec<Interval>> {
        Ok(listing(&self.store.load_availability(email)?))
    }

    /// Remove the slot at a 1-based position of the current listing.
    pub fn remove_slot(&self, email: &str, index: usize) -> Result<Vec<Interval>> {
        let current = self.store.load_availability(email)?;
        let updated = remove_listed(&current, index)?;
        self.store.save_availability(email, &updated)?;

        tracing::info!(%email, index, "removed availability");
        Ok(listing(&updated))
    }

    /// All seven days with 12-hour display windows.
    pub fn weekly_overview(&self, email: &str) -> Result<BTreeMap<Day, Vec<DisplayWindow>>> {
        Ok(project(&self.store.load_availability(email)?))
    }
}
