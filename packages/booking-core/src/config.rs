//! Store configuration.

use std::path::PathBuf;

/// File-store configuration.
///
/// All data files live under `data_dir`; the file names are overridable
/// mainly so tests can point gateways at fixtures.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Data directory for all persistent files
    pub data_dir: PathBuf,
    /// Users text file name
    pub users_file: String,
    /// Bookings binary file name
    pub bookings_file: String,
    /// Movie catalog snapshot file name
    pub movies_snapshot: String,
    /// Show catalog snapshot file name
    pub shows_snapshot: String,
    /// Hall registry snapshot file name
    pub halls_snapshot: String,
}

impl StoreConfig {
    /// Creates a configuration rooted at the given data directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn bookings_path(&self) -> PathBuf {
        self.data_dir.join(&self.bookings_file)
    }

    pub fn movies_snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.movies_snapshot)
    }

    pub fn shows_snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.shows_snapshot)
    }

    pub fn halls_snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.halls_snapshot)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            users_file: "users.txt".to_string(),
            bookings_file: "bookings.bin".to_string(),
            movies_snapshot: "movies.json".to_string(),
            shows_snapshot: "shows.json".to_string(),
            halls_snapshot: "halls.json".to_string(),
        }
    }
}
