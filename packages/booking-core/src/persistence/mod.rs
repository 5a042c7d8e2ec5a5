//! Persistence gateway for the users file, the bookings file, and the
//! catalog snapshots.
//!
//! All rewrites go through a temp file plus atomic rename; append paths
//! open, write, and release the handle before returning.

mod bookings_file;
mod snapshot;
mod users_file;

use std::fs;

use crate::config::StoreConfig;
use crate::error::{classify_io_error, BookingError};
use crate::model::{HallRegistry, Movie, Show, User};

/// File-backed store for users, bookings, and catalog snapshots.
#[derive(Debug, Clone)]
pub struct FileStore {
    config: StoreConfig,
}

impl FileStore {
    /// Creates a file store with the given configuration.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Ensures the data directory exists.
    pub(crate) fn ensure_data_dir(&self) -> Result<(), BookingError> {
        fs::create_dir_all(&self.config.data_dir)
            .map_err(|e| classify_io_error(e, "Failed to create data directory"))
    }
}

/// Read-only view of the loaded collections, used to resolve foreign keys
/// while reconstructing bookings from disk.
#[derive(Debug, Clone, Copy)]
pub struct RecordResolver<'a> {
    pub users: &'a [User],
    pub movies: &'a [Movie],
    pub shows: &'a [Show],
    pub halls: &'a HallRegistry,
}

impl<'a> RecordResolver<'a> {
    pub fn user(&self, id: u32) -> Option<&'a User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn movie(&self, sequence_id: u32) -> Option<&'a Movie> {
        self.movies.iter().find(|m| m.sequence_id == sequence_id)
    }

    pub fn show(&self, sequence_id: u32) -> Option<&'a Show> {
        self.shows.iter().find(|s| s.sequence_id == sequence_id)
    }
}
