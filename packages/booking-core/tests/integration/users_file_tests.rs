//! Users file round-trip and removal tests.

use std::fs;

use ntest::timeout;

use booking_core::model::{Role, User};

use crate::common::{guest, receptionist, temp_store};

#[timeout(5000)]
#[test]
fn appended_users_round_trip_through_read_users() {
    let (_dir, store) = temp_store();

    let admin = User::new(1, "Root", "Admin", "root", "secret", Role::Admin);
    let mut a_guest = User::new(
        2,
        "Ada",
        "Lovelace",
        "ada",
        "pw",
        Role::Guest {
            money_spent: 240,
            movies_booked: 2,
        },
    );
    let mut a_receptionist = User::new(3, "Eve", "Front", "eve", "pw", Role::receptionist(4));
    a_receptionist.record_booking(150);
    a_guest.record_booking(90);

    store.append_user(&admin).unwrap();
    store.append_user(&a_guest).unwrap();
    store.append_user(&a_receptionist).unwrap();

    let users = store.read_users().unwrap();
    assert_eq!(users, vec![admin, a_guest, a_receptionist]);
}

#[test]
fn read_users_on_missing_file_is_a_file_access_error() {
    let (_dir, store) = temp_store();
    let err = store.read_users().unwrap_err();
    assert!(matches!(err, booking_core::BookingError::FileAccess(_)), "{err}");
}

#[test]
fn malformed_lines_are_skipped_and_the_rest_read() {
    let (_dir, store) = temp_store();

    let contents = "\
1 Admin Root Admin root secret
too short
2 Guest Ada Lovelace ada pw 240 2
3 Guest Bob Broken bob pw notanumber 1
4 Receptionist Eve Front eve pw 150 1 2
";
    fs::write(store.config().users_path(), contents).unwrap();

    let users = store.read_users().unwrap();
    let usernames: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(usernames, vec!["root", "ada", "eve"]);
}

#[test]
fn negative_count_lines_are_skipped() {
    let (_dir, store) = temp_store();

    let contents = "\
1 Admin Root Admin root secret
2 Guest Ada Lovelace ada pw 240 -5
3 Receptionist Eve Front eve pw 150 1 -2
";
    fs::write(store.config().users_path(), contents).unwrap();

    let users = store.read_users().unwrap();
    let usernames: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(usernames, vec!["root"]);
}

#[test]
fn unknown_role_defaults_to_admin() {
    let (_dir, store) = temp_store();
    fs::write(store.config().users_path(), "9 Manager Max Power max pw\n").unwrap();

    let users = store.read_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(*users[0].role(), Role::Admin);
}

#[timeout(5000)]
#[test]
fn removing_an_absent_username_leaves_the_file_untouched() {
    let (_dir, store) = temp_store();
    store.append_user(&guest(1)).unwrap();
    store.append_user(&receptionist(2)).unwrap();

    let before = fs::read(store.config().users_path()).unwrap();
    let removed = store.remove_user("nobody").unwrap();
    let after = fs::read(store.config().users_path()).unwrap();

    assert!(!removed);
    assert_eq!(before, after);
}

#[test]
fn remove_user_drops_only_the_matching_line() {
    let (_dir, store) = temp_store();
    store.append_user(&guest(1)).unwrap();
    store.append_user(&guest(2)).unwrap();
    store.append_user(&receptionist(3)).unwrap();

    assert!(store.remove_user("guest2").unwrap());

    let users = store.read_users().unwrap();
    let usernames: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(usernames, vec!["guest1", "desk3"]);
}

#[test]
fn remove_user_on_missing_file_is_a_noop() {
    let (_dir, store) = temp_store();
    assert!(!store.remove_user("anyone").unwrap());
}
