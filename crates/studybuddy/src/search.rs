//! Classmate discovery and overlap search.

use std::collections::BTreeMap;

use availability_engine::weekly::DisplayWindow;
use availability_engine::{format12, overlap_summary, project, Day, OverlapRecord};
use serde::Serialize;

use crate::error::{Result, StudyBuddyError};
use crate::profile::{normalize_course, UserProfile};
use crate::store::ProfileStore;

/// A classmate together with their weekly view.
#[derive(Debug, Clone, Serialize)]
pub struct ClassmateAvailability {
    pub name: String,
    pub email: String,
    pub courses: Vec<String>,
    pub availability: BTreeMap<Day, Vec<DisplayWindow>>,
}

/// One overlap window formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapWindow {
    pub start: String,
    pub end: String,
    pub minutes: u32,
}

impl From<&OverlapRecord> for OverlapWindow {
    fn from(record: &OverlapRecord) -> Self {
        OverlapWindow {
            start: format12(record.start),
            end: format12(record.end),
            minutes: record.duration_minutes,
        }
    }
}

/// Shared free time with one classmate.
#[derive(Debug, Clone, Serialize)]
pub struct ClassmateOverlap {
    pub name: String,
    pub email: String,
    pub total_minutes: u32,
    /// Only days with at least one window are present.
    pub overlaps: BTreeMap<Day, Vec<OverlapWindow>>,
}

#[derive(Debug, Clone)]
pub struct SearchService {
    store: ProfileStore,
}

impl SearchService {
    pub fn new(store: ProfileStore) -> Self {
        SearchService { store }
    }

    /// Everyone enrolled in `course` except the requester, in storage order.
    ///
    /// # Errors
    /// `NotFound` if the requester has no profile; `Validation` if the course
    /// code is malformed.
    pub fn classmates_in_course(
        &self,
        requester_email: &str,
        course: &str,
    ) -> Result<Vec<UserProfile>> {
        if self.store.get_by_email(requester_email)?.is_none() {
            return Err(StudyBuddyError::not_found("Requester profile not found"));
        }
        let course = normalize_course(course)?;

        let classmates: Vec<UserProfile> = self
            .store
            .load_all()?
            .into_iter()
            .filter(|u| !u.same_email(requester_email) && u.is_enrolled(&course))
            .collect();

        tracing::debug!(
            requester = %requester_email,
            %course,
            found = classmates.len(),
            "classmate search"
        );
        Ok(classmates)
    }

    pub fn classmates_with_availability(
        &self,
        requester_email: &str,
        course: &str,
    ) -> Result<Vec<ClassmateAvailability>> {
        Ok(self
            .classmates_in_course(requester_email, course)?
            .into_iter()
            .map(|c| ClassmateAvailability {
                availability: project(&c.availability),
                name: c.name,
                email: c.email,
                courses: c.courses,
            })
            .collect())
    }

    /// Overlap between the requester and every classmate in `course`, most
    /// shared minutes first. Classmates with no overlap are listed last with
    /// `total_minutes == 0`.
    pub fn overlap_with_classmates(
        &self,
        requester_email: &str,
        course: &str,
    ) -> Result<Vec<ClassmateOverlap>> {
        let requester = self
            .store
            .get_by_email(requester_email)?
            .ok_or_else(|| StudyBuddyError::not_found("Requester profile not found"))?;
        let classmates = self.classmates_in_course(requester_email, course)?;

        let summaries = overlap_summary(
            &requester.availability,
            classmates.iter().map(|c| (c, &c.availability)),
        );

        Ok(summaries
            .into_iter()
            .map(|s| ClassmateOverlap {
                name: s.id.name.clone(),
                email: s.id.email.clone(),
                total_minutes: s.total_minutes,
                overlaps: s
                    .overlaps_by_day
                    .iter()
                    .map(|(day, records)| {
                        let windows: Vec<OverlapWindow> =
                            records.iter().map(OverlapWindow::from).collect();
                        (*day, windows)
                    })
                    .collect(),
            })
            .collect())
    }
}
