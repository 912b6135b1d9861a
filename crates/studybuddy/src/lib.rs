//! # studybuddy
//!
//! Student profiles, weekly availability, classmate search and two-party
//! study-session proposals, persisted as flat JSON collections.
//!
//! Interval math lives in [`availability_engine`]; this crate wires it to
//! storage and adds the profile and session rules around it.
//!
//! ## Modules
//!
//! - [`profile`] — profiles, email and course-code validation
//! - [`availability`] — add/list/remove availability and the weekly view
//! - [`search`] — classmates by course and shared free time
//! - [`session`] — propose, list and respond to study sessions
//! - [`store`] — whole-file JSON persistence with atomic replace
//! - [`config`] — data file locations
//! - [`error`] — error types

pub mod availability;
pub mod config;
pub mod error;
pub mod profile;
pub mod search;
pub mod session;
pub mod store;

pub use availability::AvailabilityService;
pub use config::StoreConfig;
pub use error::StudyBuddyError;
pub use profile::{ProfileService, UserProfile};
pub use search::SearchService;
pub use session::{Proposal, SessionAction, SessionService, SessionStatus, StudySession};
pub use store::{AvailabilityStore, FlatFile, ProfileStore};

use session::SessionStore;

/// Every service, sharing one pair of data files.
#[derive(Debug, Clone)]
pub struct StudyBuddy {
    pub profiles: ProfileService,
    pub availability: AvailabilityService<ProfileStore>,
    pub search: SearchService,
    pub sessions: SessionService,
}

impl StudyBuddy {
    pub fn open(config: &StoreConfig) -> Self {
        let profiles = ProfileStore::new(&config.users_path);
        let sessions = SessionStore::new(&config.sessions_path);
        StudyBuddy {
            profiles: ProfileService::new(profiles.clone()),
            availability: AvailabilityService::new(profiles.clone()),
            search: SearchService::new(profiles.clone()),
            sessions: SessionService::new(profiles, sessions),
        }
    }
}
