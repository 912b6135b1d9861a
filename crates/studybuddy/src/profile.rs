//! User profiles and course enrollment.

use std::sync::LazyLock;

use availability_engine::AvailabilitySet;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyBuddyError};
use crate::store::{ProfileStore, Record};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Za-z0-9_.+-]+@clemson\.edu$").expect("valid regex"));

// Letters then digits, spaces already removed, e.g. CPSC3720.
static COURSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{3,4})(\d{4})$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub courses: Vec<String>,
    /// Weekly availability, already merged.
    #[serde(default)]
    pub availability: AvailabilitySet,
}

impl UserProfile {
    pub fn is_enrolled(&self, course: &str) -> bool {
        self.courses.iter().any(|c| c == course)
    }

    pub fn same_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

impl Record for UserProfile {
    const COLLECTION: &'static str = "users";
    type Key = String;

    fn key(&self) -> String {
        self.email.to_lowercase()
    }
}

/// Normalize a course code to `"LETTERS DIGITS"`.
///
/// Case and spaces are ignored on input: `"cpsc3720"`, `"CPSC 3720"` and
/// `" cpsc  3720 "` all become `"CPSC 3720"`.
///
/// # Errors
/// Returns `StudyBuddyError::Validation` unless the code is 3–4 letters
/// followed by 4 digits.
pub fn normalize_course(raw: &str) -> Result<String> {
    let candidate: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    let caps = COURSE_PATTERN
        .captures(&candidate)
        .ok_or_else(|| StudyBuddyError::validation("Course code must look like CPSC 3720"))?;
    Ok(format!("{} {}", &caps[1], &caps[2]))
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Profile creation and course management.
#[derive(Debug, Clone)]
pub struct ProfileService {
    store: ProfileStore,
}

impl ProfileService {
    pub fn new(store: ProfileStore) -> Self {
        ProfileService { store }
    }

    /// Create an empty profile.
    ///
    /// # Errors
    /// `Validation` if the name is blank, the email is not an
    /// `@clemson.edu` address, or a profile with that email already exists.
    pub fn create_profile(&self, name: &str, email: &str) -> Result<UserProfile> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(StudyBuddyError::validation("Name is required"));
        }
        if !is_valid_email(email) {
            return Err(StudyBuddyError::validation(
                "Email must be a valid Clemson address ending in @clemson.edu",
            ));
        }
        if self.store.get_by_email(email)?.is_some() {
            return Err(StudyBuddyError::validation(
                "A profile with that email already exists",
            ));
        }

        let profile = UserProfile {
            name: name.to_string(),
            email: email.to_string(),
            courses: Vec::new(),
            availability: AvailabilitySet::new(),
        };
        self.store.upsert(profile.clone())?;
        tracing::info!(email = %profile.email, "created profile");
        Ok(profile)
    }

    /// Enroll in a course. Adding a course twice is a no-op.
    pub fn add_course(&self, email: &str, course_code: &str) -> Result<UserProfile> {
        let mut profile = self.store.require(email)?;
        let course = normalize_course(course_code)?;
        if !profile.is_enrolled(&course) {
            profile.courses.push(course.clone());
            self.store.upsert(profile.clone())?;
            tracing::info!(email = %profile.email, %course, "added course");
        }
        Ok(profile)
    }

    pub fn list_courses(&self, email: &str) -> Result<Vec<String>> {
        Ok(self.store.require(email)?.courses)
    }

    pub fn get_profile(&self, email: &str) -> Result<UserProfile> {
        self.store.require(email)
    }
}
