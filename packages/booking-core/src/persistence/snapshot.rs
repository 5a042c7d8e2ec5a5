//! Versioned JSON snapshots of the movie and show catalogs.
//!
//! The original system dumped the whole catalog object graph as an opaque
//! blob between sessions; here each snapshot is a pretty-printed JSON
//! document with an explicit version field.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::catalog::{MovieCatalog, ShowCatalog};
use crate::error::{classify_io_error, BookingError};
use crate::model::{HallRegistry, Movie, Show};

use super::FileStore;

/// Snapshot format version.
const SNAPSHOT_VERSION: u32 = 1;

/// Catalog snapshot file format.
#[derive(Debug, Deserialize)]
struct SnapshotFile<T> {
    /// Snapshot format version
    version: u32,
    /// Catalog records
    records: Vec<T>,
}

/// Borrowing form of `SnapshotFile`, used on the write path.
#[derive(Debug, Serialize)]
struct SnapshotFileRef<'a, T> {
    version: u32,
    records: &'a [T],
}

/// Hall registry snapshot, write side.
#[derive(Debug, Serialize)]
struct RegistrySnapshot<'a> {
    version: u32,
    registry: &'a HallRegistry,
}

/// Hall registry snapshot, read side.
#[derive(Debug, Deserialize)]
struct RegistrySnapshotOwned {
    version: u32,
    registry: HallRegistry,
}

impl FileStore {
    /// Saves the movie catalog snapshot.
    pub fn save_movie_catalog(&self, catalog: &MovieCatalog) -> Result<(), BookingError> {
        self.write_snapshot(&self.config().movies_snapshot_path(), catalog.movies())
    }

    /// Loads the movie catalog; a missing snapshot yields an empty catalog.
    pub fn load_movie_catalog(&self) -> Result<MovieCatalog, BookingError> {
        let records: Vec<Movie> = self.read_snapshot(&self.config().movies_snapshot_path())?;
        Ok(MovieCatalog::from_records(records))
    }

    /// Saves the show catalog snapshot.
    pub fn save_show_catalog(&self, catalog: &ShowCatalog) -> Result<(), BookingError> {
        self.write_snapshot(&self.config().shows_snapshot_path(), catalog.shows())
    }

    /// Loads the show catalog; a missing snapshot yields an empty catalog.
    pub fn load_show_catalog(&self) -> Result<ShowCatalog, BookingError> {
        let records: Vec<Show> = self.read_snapshot(&self.config().shows_snapshot_path())?;
        Ok(ShowCatalog::from_records(records))
    }

    /// Saves the hall registry snapshot (halls, seats, and id sequences).
    pub fn save_hall_registry(&self, registry: &HallRegistry) -> Result<(), BookingError> {
        let document = RegistrySnapshot {
            version: SNAPSHOT_VERSION,
            registry,
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| BookingError::Serialization(e.to_string()))?;
        self.write_document(&self.config().halls_snapshot_path(), &json)
    }

    /// Loads the hall registry; a missing snapshot yields an empty registry.
    pub fn load_hall_registry(&self) -> Result<HallRegistry, BookingError> {
        let path = self.config().halls_snapshot_path();
        if !path.exists() {
            return Ok(HallRegistry::new());
        }
        let contents = fs::read_to_string(&path)
            .map_err(|e| classify_io_error(e, "Failed to read snapshot file"))?;
        let document: RegistrySnapshotOwned = serde_json::from_str(&contents)
            .map_err(|e| BookingError::Serialization(format!("Failed to parse snapshot: {}", e)))?;
        if document.version != SNAPSHOT_VERSION {
            return Err(BookingError::Serialization(format!(
                "Unsupported snapshot version: {}",
                document.version
            )));
        }
        Ok(document.registry)
    }

    fn write_snapshot<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<(), BookingError> {
        let snapshot = SnapshotFileRef {
            version: SNAPSHOT_VERSION,
            records,
        };
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| BookingError::Serialization(e.to_string()))?;
        self.write_document(path, &json)
    }

    /// Writes a JSON document through a temp file and an atomic rename.
    fn write_document(&self, path: &Path, json: &str) -> Result<(), BookingError> {
        self.ensure_data_dir()?;
        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path)
            .map_err(|e| classify_io_error(e, "Failed to create temp snapshot file"))?;
        file.write_all(json.as_bytes())
            .map_err(|e| classify_io_error(e, "Failed to write snapshot"))?;
        file.sync_all()
            .map_err(|e| classify_io_error(e, "Failed to sync snapshot"))?;
        fs::rename(&temp_path, path)
            .map_err(|e| classify_io_error(e, "Failed to rename snapshot file"))?;
        Ok(())
    }

    fn read_snapshot<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>, BookingError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(path)
            .map_err(|e| classify_io_error(e, "Failed to read snapshot file"))?;
        let snapshot: SnapshotFile<T> = serde_json::from_str(&contents)
            .map_err(|e| BookingError::Serialization(format!("Failed to parse snapshot: {}", e)))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(BookingError::Serialization(format!(
                "Unsupported snapshot version: {}",
                snapshot.version
            )));
        }
        Ok(snapshot.records)
    }
}
