//! Error types for availability-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    /// A day or time literal could not be parsed (bad separator, non-numeric,
    /// out-of-range hour/minute, or a meridiem suffix on a 24-hour value).
    #[error("{0}")]
    Format(String),

    /// A semantically invalid interval or a failed lookup/containment check.
    #[error("{0}")]
    Range(String),
}

impl AvailabilityError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        AvailabilityError::Format(msg.into())
    }

    pub(crate) fn range(msg: impl Into<String>) -> Self {
        AvailabilityError::Range(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
