//! Study-session proposals between two classmates.
//!
//! A session starts `Pending` and moves once to `Accepted` or `Declined`,
//! decided by the invitee. The proposed window must fit inside one
//! availability interval of *each* participant at proposal time; it is not
//! re-checked when the invitee responds.

use std::fmt;
use std::str::FromStr;

use availability_engine::{ensure_fits_within, normalize_day, parse, Day, Interval, TimePoint};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyBuddyError};
use crate::profile::normalize_course;
use crate::store::{FlatFile, ProfileStore, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Accepted => "accepted",
            SessionStatus::Declined => "declined",
        })
    }
}

/// The invitee's answer to a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Accept,
    Decline,
}

impl FromStr for SessionAction {
    type Err = StudyBuddyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "accept" => Ok(SessionAction::Accept),
            "decline" => Ok(SessionAction::Decline),
            _ => Err(StudyBuddyError::validation("Action must be accept or decline")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: u64,
    pub requester: String,
    pub invitee: String,
    pub course: String,
    pub day: Day,
    pub start: TimePoint,
    pub end: TimePoint,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl StudySession {
    fn is_requester(&self, email: &str) -> bool {
        self.requester.eq_ignore_ascii_case(email.trim())
    }

    fn is_invitee(&self, email: &str) -> bool {
        self.invitee.eq_ignore_ascii_case(email.trim())
    }

    fn involves(&self, email: &str) -> bool {
        self.is_requester(email) || self.is_invitee(email)
    }
}

impl Record for StudySession {
    const COLLECTION: &'static str = "sessions";
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }
}

pub type SessionStore = FlatFile<StudySession>;

impl SessionStore {
    /// One past the highest id in use, or 1 for an empty collection.
    pub fn next_id(&self) -> Result<u64> {
        Ok(self.load_all()?.iter().map(|s| s.id).max().unwrap_or(0) + 1)
    }
}

/// A proposal as entered by the requester, before validation.
#[derive(Debug, Clone, Default)]
pub struct Proposal<'a> {
    pub requester: &'a str,
    pub invitee: &'a str,
    pub course: &'a str,
    pub day: &'a str,
    pub start: &'a str,
    pub end: &'a str,
    pub message: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct SessionService {
    profiles: ProfileStore,
    sessions: SessionStore,
}

impl SessionService {
    pub fn new(profiles: ProfileStore, sessions: SessionStore) -> Self {
        SessionService { profiles, sessions }
    }

    /// Validate and record a new pending session.
    ///
    /// Checks, in order: not inviting yourself, both profiles exist, both are
    /// enrolled in the course, the day/times parse, end is after start, and
    /// the window fits the requester's and then the invitee's availability.
    ///
    /// # Errors
    /// `Validation` / `NotFound` for the profile checks, and
    /// `Availability` (format or range) for the time checks.
    pub fn propose(&self, proposal: &Proposal<'_>) -> Result<StudySession> {
        if proposal.requester.trim().eq_ignore_ascii_case(proposal.invitee.trim()) {
            return Err(StudyBuddyError::validation("Cannot invite yourself"));
        }
        let (Some(requester), Some(invitee)) = (
            self.profiles.get_by_email(proposal.requester)?,
            self.profiles.get_by_email(proposal.invitee)?,
        ) else {
            return Err(StudyBuddyError::not_found(
                "Both requester and invitee must exist",
            ));
        };

        let course = normalize_course(proposal.course)?;
        if !requester.is_enrolled(&course) || !invitee.is_enrolled(&course) {
            return Err(StudyBuddyError::validation(
                "Both users must be enrolled in the course",
            ));
        }

        let day = normalize_day(proposal.day)?;
        let window = Interval::new(day, parse(proposal.start)?, parse(proposal.end)?)?;

        ensure_fits_within(&requester.availability, day, window.start, window.end, "Requester")?;
        ensure_fits_within(&invitee.availability, day, window.start, window.end, "Invitee")?;

        let session = StudySession {
            id: self.sessions.next_id()?,
            requester: requester.email,
            invitee: invitee.email,
            course,
            day,
            start: window.start,
            end: window.end,
            status: SessionStatus::Pending,
            message: proposal.message.map(str::to_string),
            created_at: Some(Utc::now()),
        };
        self.sessions.upsert(session.clone())?;

        tracing::info!(
            id = session.id,
            requester = %session.requester,
            invitee = %session.invitee,
            day = %session.day,
            "proposed session"
        );
        Ok(session)
    }

    /// Pending sessions where `email` is the invitee.
    pub fn incoming_requests(&self, email: &str) -> Result<Vec<StudySession>> {
        self.filtered(|s| s.status == SessionStatus::Pending && s.is_invitee(email))
    }

    /// Pending sessions where `email` is the requester.
    pub fn outgoing_requests(&self, email: &str) -> Result<Vec<StudySession>> {
        self.filtered(|s| s.status == SessionStatus::Pending && s.is_requester(email))
    }

    /// Accepted sessions with `email` on either side.
    pub fn confirmed_sessions(&self, email: &str) -> Result<Vec<StudySession>> {
        self.filtered(|s| s.status == SessionStatus::Accepted && s.involves(email))
    }

    /// Accept or decline a pending session as its invitee.
    ///
    /// # Errors
    /// `NotFound` for an unknown id; `Validation` if the session is already
    /// finalized or `responder_email` is not the invitee.
    pub fn respond(
        &self,
        session_id: u64,
        responder_email: &str,
        action: SessionAction,
    ) -> Result<StudySession> {
        let mut session = self
            .sessions
            .get(&session_id)?
            .ok_or_else(|| StudyBuddyError::not_found("Session not found"))?;

        if session.status != SessionStatus::Pending {
            return Err(StudyBuddyError::validation("Session already finalized"));
        }
        if !session.is_invitee(responder_email) {
            return Err(StudyBuddyError::validation("Only invitee can respond"));
        }

        session.status = match action {
            SessionAction::Accept => SessionStatus::Accepted,
            SessionAction::Decline => SessionStatus::Declined,
        };
        self.sessions.upsert(session.clone())?;

        tracing::info!(id = session.id, status = %session.status, "responded to session");
        Ok(session)
    }

    fn filtered(&self, keep: impl Fn(&StudySession) -> bool) -> Result<Vec<StudySession>> {
        Ok(self.sessions.load_all()?.into_iter().filter(|s| keep(s)).collect())
    }
}
