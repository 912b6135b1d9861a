//! Error types for studybuddy services.

use availability_engine::AvailabilityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudyBuddyError {
    /// Input that fails a business rule (bad email, not enrolled, wrong
    /// responder, ...).
    #[error("{0}")]
    Validation(String),

    /// A profile or session that does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A day/time literal or interval rejected by the availability engine.
    #[error(transparent)]
    Availability(#[from] AvailabilityError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt data file: {0}")]
    Json(#[from] serde_json::Error),
}

impl StudyBuddyError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        StudyBuddyError::Validation(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        StudyBuddyError::NotFound(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, StudyBuddyError>;
