//! Flat-file persistence.
//!
//! Each collection is one JSON document of the form `{"<collection>": [...]}`.
//! Every operation reads the whole file, mutates in memory and writes the
//! whole file back. Writes go to a sibling `.tmp` file first and are then
//! renamed over the target, so readers see either the old or the new file.
//!
//! There is no locking: a single process is assumed.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use availability_engine::AvailabilitySet;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, StudyBuddyError};
use crate::profile::UserProfile;

/// A record that can live in a [`FlatFile`].
pub trait Record: Serialize + DeserializeOwned {
    /// Top-level key of the JSON document, e.g. `"users"`.
    const COLLECTION: &'static str;

    /// Identity used by [`FlatFile::get`] and [`FlatFile::upsert`].
    type Key: PartialEq;

    fn key(&self) -> Self::Key;
}

/// One JSON file holding a whole collection of `T`.
#[derive(Debug, Clone)]
pub struct FlatFile<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Record> FlatFile<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FlatFile {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. A missing file is an empty collection.
    ///
    /// # Errors
    /// Returns `StudyBuddyError::Io` if the file exists but cannot be read and
    /// `StudyBuddyError::Json` if it is not a valid collection document.
    pub fn load_all(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&self.path)?;
        let mut root: Map<String, Value> = serde_json::from_str(&text)?;
        let records: Vec<T> = match root.remove(T::COLLECTION) {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };

        tracing::debug!(
            path = %self.path.display(),
            collection = T::COLLECTION,
            count = records.len(),
            "loaded collection"
        );
        Ok(records)
    }

    /// Replace the whole collection on disk.
    ///
    /// Creates the parent directory if needed, writes `<name>.tmp`, then
    /// renames it over the target.
    pub fn save_all(&self, records: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut root = Map::new();
        root.insert(T::COLLECTION.to_string(), serde_json::to_value(records)?);
        let body = serde_json::to_string_pretty(&Value::Object(root))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            collection = T::COLLECTION,
            count = records.len(),
            "saved collection"
        );
        Ok(())
    }

    /// Find the record with the given key.
    pub fn get(&self, key: &T::Key) -> Result<Option<T>> {
        Ok(self.load_all()?.into_iter().find(|r| r.key() == *key))
    }

    /// Replace the record with the same key, or append it.
    pub fn upsert(&self, record: T) -> Result<()> {
        let mut records = self.load_all()?;
        let key = record.key();
        match records.iter_mut().find(|r| r.key() == key) {
            Some(slot) => *slot = record,
            None => records.push(record),
        }
        self.save_all(&records)
    }
}

/// Whole-object access to a user's availability, keyed by email.
pub trait AvailabilityStore {
    /// # Errors
    /// Returns `StudyBuddyError::NotFound` if no such user exists.
    fn load_availability(&self, user_id: &str) -> Result<AvailabilitySet>;

    /// Replace the user's stored availability wholesale.
    fn save_availability(&self, user_id: &str, availability: &AvailabilitySet) -> Result<()>;
}

pub type ProfileStore = FlatFile<UserProfile>;

impl ProfileStore {
    /// Case-insensitive lookup by email.
    pub fn get_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        self.get(&email.trim().to_lowercase())
    }

    /// Like [`ProfileStore::get_by_email`], but a missing profile is an error.
    pub fn require(&self, email: &str) -> Result<UserProfile> {
        self.get_by_email(email)?
            .ok_or_else(|| StudyBuddyError::not_found("Profile not found for email"))
    }
}

impl AvailabilityStore for ProfileStore {
    fn load_availability(&self, user_id: &str) -> Result<AvailabilitySet> {
        Ok(self.require(user_id)?.availability)
    }

    fn save_availability(&self, user_id: &str, availability: &AvailabilitySet) -> Result<()> {
        let mut profile = self.require(user_id)?;
        profile.availability = availability.clone();
        self.upsert(profile)
    }
}
