//! Catalog snapshot save/load tests.

use std::fs;

use chrono::NaiveDate;
use ntest::timeout;

use booking_core::catalog::NewMovie;
use booking_core::BookingError;

use crate::common::{catalog_with_movie, catalog_with_show, temp_store};

#[timeout(5000)]
#[test]
fn movie_catalog_round_trips_through_the_snapshot() {
    let (_dir, store) = temp_store();
    let (catalog, _) = catalog_with_movie(120);

    store.save_movie_catalog(&catalog).unwrap();
    let loaded = store.load_movie_catalog().unwrap();

    assert_eq!(loaded.movies(), catalog.movies());
}

#[test]
fn show_catalog_round_trips_through_the_snapshot() {
    let (_dir, store) = temp_store();
    let (catalog, _) = catalog_with_show(90);

    store.save_show_catalog(&catalog).unwrap();
    let loaded = store.load_show_catalog().unwrap();

    assert_eq!(loaded.shows(), catalog.shows());
}

#[test]
fn loading_a_missing_snapshot_yields_an_empty_catalog() {
    let (_dir, store) = temp_store();
    assert!(store.load_movie_catalog().unwrap().is_empty());
    assert!(store.load_show_catalog().unwrap().is_empty());
}

#[test]
fn loaded_catalog_resumes_sequence_numbering() {
    let (_dir, store) = temp_store();
    let (mut catalog, first_id) = catalog_with_movie(120);
    assert_eq!(first_id, 1);
    store.save_movie_catalog(&catalog).unwrap();
    drop(catalog);

    catalog = store.load_movie_catalog().unwrap();
    let next_id = catalog
        .add(NewMovie {
            catalog_id: 501,
            name: "Dune".to_string(),
            ticket_price: 150,
            director: "Villeneuve".to_string(),
            genres: "Sci-Fi".to_string(),
            published: NaiveDate::from_ymd_opt(2021, 10, 22).unwrap(),
            duration_hours: 2,
            duration_minutes: 35,
        })
        .unwrap();
    assert_eq!(next_id, 2);
}

#[test]
fn hall_registry_round_trips_with_reservations_and_sequences() {
    let (_dir, store) = temp_store();
    let mut registry = booking_core::model::HallRegistry::new();
    let hall_id = registry.create_hall(3);
    registry.set_reserved(hall_id, 2, true).unwrap();

    store.save_hall_registry(&registry).unwrap();
    let mut loaded = store.load_hall_registry().unwrap();

    assert!(loaded.seat(hall_id, 2).unwrap().reserved);
    assert!(!loaded.seat(hall_id, 1).unwrap().reserved);

    // Seat numbering continues past the persisted seats.
    let next_hall = loaded.create_hall(1);
    let numbers: Vec<u32> = loaded
        .hall(next_hall)
        .unwrap()
        .seats()
        .map(|s| s.seat_number)
        .collect();
    assert_eq!(numbers, vec![4]);
}

#[test]
fn corrupt_snapshot_is_a_serialization_error() {
    let (_dir, store) = temp_store();
    fs::write(store.config().movies_snapshot_path(), "not json {").unwrap();

    let err = store.load_movie_catalog().unwrap_err();
    assert!(matches!(err, BookingError::Serialization(_)), "{err}");
}

#[test]
fn unsupported_snapshot_version_is_rejected() {
    let (_dir, store) = temp_store();
    fs::write(
        store.config().movies_snapshot_path(),
        r#"{"version": 99, "records": []}"#,
    )
    .unwrap();

    let err = store.load_movie_catalog().unwrap_err();
    assert!(matches!(err, BookingError::Serialization(_)), "{err}");
}
