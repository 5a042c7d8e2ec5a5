//! Shared fixtures for the integration suite.

use chrono::NaiveDate;
use tempfile::TempDir;

use booking_core::catalog::{MovieCatalog, NewMovie, NewShow, ShowCatalog};
use booking_core::model::{HallRegistry, Role, User};
use booking_core::{FileStore, StoreConfig};

/// A file store rooted in a fresh temp directory.
pub fn temp_store() -> (TempDir, FileStore) {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::with_data_dir(temp_dir.path());
    let store = FileStore::new(&config);
    (temp_dir, store)
}

pub fn guest(id: u32) -> User {
    User::new(id, "Ada", "Lovelace", format!("guest{}", id), "pw", Role::guest())
}

pub fn receptionist(id: u32) -> User {
    User::new(
        id,
        "Eve",
        "Front",
        format!("desk{}", id),
        "pw",
        Role::receptionist(1),
    )
}

/// A movie catalog with one movie priced at `price`; returns its id too.
pub fn catalog_with_movie(price: i64) -> (MovieCatalog, u32) {
    let mut catalog = MovieCatalog::new();
    let id = catalog
        .add(NewMovie {
            catalog_id: 500,
            name: "Arrival".to_string(),
            ticket_price: price,
            director: "Villeneuve".to_string(),
            genres: "Sci-Fi/Drama".to_string(),
            published: NaiveDate::from_ymd_opt(2016, 11, 11).unwrap(),
            duration_hours: 1,
            duration_minutes: 56,
        })
        .unwrap();
    (catalog, id)
}

/// A show catalog with one show priced at `price`; returns its id too.
pub fn catalog_with_show(price: i64) -> (ShowCatalog, u32) {
    let mut catalog = ShowCatalog::new();
    let id = catalog
        .add(NewShow {
            catalog_id: 700,
            title: "Evening show".to_string(),
            ticket_price: price,
            genre: "Drama".to_string(),
            time_hour: 20,
            time_minute: 30,
            date_day: 12,
            date_month: 6,
        })
        .unwrap();
    (catalog, id)
}

/// A registry with one hall of `seats` free seats; returns the hall id too.
pub fn registry_with_hall(seats: u32) -> (HallRegistry, u32) {
    let mut registry = HallRegistry::new();
    let hall_id = registry.create_hall(seats);
    (registry, hall_id)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
