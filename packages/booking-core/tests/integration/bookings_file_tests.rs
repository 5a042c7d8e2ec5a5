//! Bookings binary file round-trip and integrity tests.

use std::fs;

use ntest::timeout;

use booking_core::model::{Booking, HallRegistry};
use booking_core::{BookingError, RecordResolver};

use crate::common::{
    catalog_with_movie, catalog_with_show, date, guest, receptionist, registry_with_hall,
    temp_store,
};

fn booking(
    number: u32,
    movie_id: Option<u32>,
    show_id: Option<u32>,
    hall_id: u32,
    seat_number: u32,
) -> Booking {
    Booking {
        booking_number: number,
        date_created: date(2024, 6, 12),
        movie_id,
        show_id,
        guest_id: 1,
        receptionist_id: 2,
        seat_number,
        hall_id,
    }
}

#[timeout(5000)]
#[test]
fn appended_bookings_round_trip_through_read_bookings() {
    let (_dir, store) = temp_store();
    let users = vec![guest(1), receptionist(2)];
    let (movies, movie_id) = catalog_with_movie(120);
    let (shows, show_id) = catalog_with_show(90);
    let (halls, hall_id) = registry_with_hall(3);

    let first = booking(1, Some(movie_id), None, hall_id, 1);
    let second = booking(2, None, Some(show_id), hall_id, 2);
    store.append_booking(&first).unwrap();
    store.append_booking(&second).unwrap();

    let resolver = RecordResolver {
        users: &users,
        movies: movies.movies(),
        shows: shows.shows(),
        halls: &halls,
    };
    let loaded = store.read_bookings(&resolver).unwrap();
    assert_eq!(loaded, vec![first, second]);
}

#[test]
fn read_bookings_on_missing_file_is_empty() {
    let (_dir, store) = temp_store();
    let users = vec![];
    let halls = HallRegistry::new();
    let resolver = RecordResolver {
        users: &users,
        movies: &[],
        shows: &[],
        halls: &halls,
    };
    assert!(store.read_bookings(&resolver).unwrap().is_empty());
}

#[timeout(5000)]
#[test]
fn dangling_seat_reference_is_a_record_integrity_error() {
    let (_dir, store) = temp_store();
    let users = vec![guest(1), receptionist(2)];
    let (movies, movie_id) = catalog_with_movie(120);
    let (halls, hall_id) = registry_with_hall(2);

    store
        .append_booking(&booking(1, Some(movie_id), None, hall_id, 99))
        .unwrap();

    let resolver = RecordResolver {
        users: &users,
        movies: movies.movies(),
        shows: &[],
        halls: &halls,
    };
    let err = store.read_bookings(&resolver).unwrap_err();
    assert!(matches!(err, BookingError::RecordIntegrity(_)), "{err}");
}

#[test]
fn dangling_user_reference_is_a_record_integrity_error() {
    let (_dir, store) = temp_store();
    let users = vec![receptionist(2)];
    let (movies, movie_id) = catalog_with_movie(120);
    let (halls, hall_id) = registry_with_hall(2);

    // Guest id 1 is not in the user list.
    store
        .append_booking(&booking(1, Some(movie_id), None, hall_id, 1))
        .unwrap();

    let resolver = RecordResolver {
        users: &users,
        movies: movies.movies(),
        shows: &[],
        halls: &halls,
    };
    let err = store.read_bookings(&resolver).unwrap_err();
    assert!(matches!(err, BookingError::RecordIntegrity(_)), "{err}");
}

#[test]
fn dangling_movie_reference_is_a_record_integrity_error() {
    let (_dir, store) = temp_store();
    let users = vec![guest(1), receptionist(2)];
    let (halls, hall_id) = registry_with_hall(2);

    store
        .append_booking(&booking(1, Some(42), None, hall_id, 1))
        .unwrap();

    let resolver = RecordResolver {
        users: &users,
        movies: &[],
        shows: &[],
        halls: &halls,
    };
    let err = store.read_bookings(&resolver).unwrap_err();
    assert!(matches!(err, BookingError::RecordIntegrity(_)), "{err}");
}

#[test]
fn truncated_trailing_record_fails_the_load() {
    let (_dir, store) = temp_store();
    let users = vec![guest(1), receptionist(2)];
    let (movies, movie_id) = catalog_with_movie(120);
    let (halls, hall_id) = registry_with_hall(2);

    store
        .append_booking(&booking(1, Some(movie_id), None, hall_id, 1))
        .unwrap();

    let path = store.config().bookings_path();
    let mut bytes = fs::read(&path).unwrap();
    bytes.truncate(bytes.len() - 3);
    fs::write(&path, bytes).unwrap();

    let resolver = RecordResolver {
        users: &users,
        movies: movies.movies(),
        shows: &[],
        halls: &halls,
    };
    let err = store.read_bookings(&resolver).unwrap_err();
    assert!(matches!(err, BookingError::MalformedRecord(_)), "{err}");
}

#[timeout(5000)]
#[test]
fn rewrite_excluding_drops_only_the_target_booking() {
    let (_dir, store) = temp_store();
    let users = vec![guest(1), receptionist(2)];
    let (movies, movie_id) = catalog_with_movie(120);
    let (halls, hall_id) = registry_with_hall(3);

    store
        .append_booking(&booking(1, Some(movie_id), None, hall_id, 1))
        .unwrap();
    store
        .append_booking(&booking(2, Some(movie_id), None, hall_id, 2))
        .unwrap();
    store
        .append_booking(&booking(3, Some(movie_id), None, hall_id, 3))
        .unwrap();

    assert!(store.rewrite_bookings_excluding(2).unwrap());

    let resolver = RecordResolver {
        users: &users,
        movies: movies.movies(),
        shows: &[],
        halls: &halls,
    };
    let numbers: Vec<u32> = store
        .read_bookings(&resolver)
        .unwrap()
        .iter()
        .map(|b| b.booking_number)
        .collect();
    assert_eq!(numbers, vec![1, 3]);
}

#[test]
fn rewrite_excluding_an_absent_number_reports_nothing_removed() {
    let (_dir, store) = temp_store();
    let (_movies, movie_id) = catalog_with_movie(120);
    let (_halls, hall_id) = registry_with_hall(1);

    store
        .append_booking(&booking(1, Some(movie_id), None, hall_id, 1))
        .unwrap();

    let before = fs::read(store.config().bookings_path()).unwrap();
    assert!(!store.rewrite_bookings_excluding(99).unwrap());
    let after = fs::read(store.config().bookings_path()).unwrap();
    assert_eq!(before, after);
}
