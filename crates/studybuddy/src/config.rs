//! Where the flat data files live.
//!
//! Defaults to `data/users.json` and `data/sessions.json` under the working
//! directory. The binary reads the variables below and passes them in
//! through [`StoreConfig::with_overrides`].

use std::path::{Path, PathBuf};

/// Environment variable overriding the profile file.
pub const USERS_PATH_ENV: &str = "STUDYBUDDY_DATA_PATH";

/// Environment variable overriding the session file.
pub const SESSIONS_PATH_ENV: &str = "STUDYBUDDY_SESSIONS_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub users_path: PathBuf,
    pub sessions_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            users_path: Path::new("data").join("users.json"),
            sessions_path: Path::new("data").join("sessions.json"),
        }
    }
}

impl StoreConfig {
    /// Both files inside `dir`, named `users.json` and `sessions.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        StoreConfig {
            users_path: dir.join("users.json"),
            sessions_path: dir.join("sessions.json"),
        }
    }

    /// Replace either path when `Some`.
    pub fn with_overrides(mut self, users: Option<PathBuf>, sessions: Option<PathBuf>) -> Self {
        if let Some(path) = users {
            self.users_path = path;
        }
        if let Some(path) = sessions {
            self.sessions_path = path;
        }
        self
    }
}
