//! Aggregate report queries over catalogs and user collections.
//!
//! Two different tie-breaking rules coexist here on purpose. The
//! most-revenue scans use strict `>` so the first maximum encountered wins,
//! matching the counter scans in the engine. The four `max_*` queries use
//! `>=` so the last tied maximum wins; callers depend on that exact shape.

use std::collections::BTreeMap;

use crate::model::{Movie, Role, Show, User};

/// The movie with the highest `ticket_price * most_booked_count` product,
/// by sequence id; ties resolve to the first encountered.
///
/// Every movie's price is multiplied by the single globally-most-booked
/// count, not by that movie's own booking count. This reproduces the
/// established report behavior; `most_revenue_movie_by_counts` is the
/// per-movie variant.
pub fn most_revenue_movie(movies: &[Movie], most_booked_count: u32) -> Option<u32> {
    let mut best: Option<(u32, i64)> = None;
    for movie in movies {
        let revenue = movie.ticket_price * i64::from(most_booked_count);
        match best {
            Some((_, best_revenue)) if revenue > best_revenue => {
                best = Some((movie.sequence_id, revenue))
            }
            None => best = Some((movie.sequence_id, revenue)),
            _ => {}
        }
    }
    best.map(|(id, _)| id)
}

/// The movie with the highest `ticket_price * own booking count` product,
/// by sequence id; ties resolve to the first encountered. Movies absent
/// from the counter map count as 0.
pub fn most_revenue_movie_by_counts(
    movies: &[Movie],
    counts: &BTreeMap<u32, u32>,
) -> Option<u32> {
    let mut best: Option<(u32, i64)> = None;
    for movie in movies {
        let count = counts.get(&movie.sequence_id).copied().unwrap_or(0);
        let revenue = movie.ticket_price * i64::from(count);
        match best {
            Some((_, best_revenue)) if revenue > best_revenue => {
                best = Some((movie.sequence_id, revenue))
            }
            None => best = Some((movie.sequence_id, revenue)),
            _ => {}
        }
    }
    best.map(|(id, _)| id)
}

/// Show counterpart of `most_revenue_movie`, with the same globally-most-
/// booked-count semantics and first-encountered tie-breaking.
pub fn most_revenue_show(shows: &[Show], most_booked_count: u32) -> Option<u32> {
    let mut best: Option<(u32, i64)> = None;
    for show in shows {
        let revenue = show.ticket_price * i64::from(most_booked_count);
        match best {
            Some((_, best_revenue)) if revenue > best_revenue => {
                best = Some((show.sequence_id, revenue))
            }
            None => best = Some((show.sequence_id, revenue)),
            _ => {}
        }
    }
    best.map(|(id, _)| id)
}

/// The receptionist id with the most bookings; the last tied maximum wins.
pub fn max_receptionist_by_bookings(map: &BTreeMap<u32, u32>) -> Option<u32> {
    last_tied_max_key(map)
}

/// The receptionist id with the most revenue; the last tied maximum wins.
pub fn max_receptionist_by_revenue(map: &BTreeMap<u32, i64>) -> Option<u32> {
    last_tied_max_key(map)
}

/// The guest id with the most bookings; the last tied maximum wins.
pub fn max_guest_by_bookings(map: &BTreeMap<u32, u32>) -> Option<u32> {
    last_tied_max_key(map)
}

/// The guest id with the most money spent; the last tied maximum wins.
pub fn max_guest_by_revenue(map: &BTreeMap<u32, i64>) -> Option<u32> {
    last_tied_max_key(map)
}

/// Builds the receptionist id -> booking count map from a user list.
pub fn receptionist_booking_counts(users: &[User]) -> BTreeMap<u32, u32> {
    users
        .iter()
        .filter_map(|user| match user.role() {
            Role::Receptionist { movies_booked, .. } => Some((user.id, *movies_booked)),
            _ => None,
        })
        .collect()
}

/// Builds the receptionist id -> revenue map from a user list.
pub fn receptionist_revenue(users: &[User]) -> BTreeMap<u32, i64> {
    users
        .iter()
        .filter_map(|user| match user.role() {
            Role::Receptionist { revenue_made, .. } => Some((user.id, *revenue_made)),
            _ => None,
        })
        .collect()
}

/// Builds the guest id -> booking count map from a user list.
pub fn guest_booking_counts(users: &[User]) -> BTreeMap<u32, u32> {
    users
        .iter()
        .filter_map(|user| match user.role() {
            Role::Guest { movies_booked, .. } => Some((user.id, *movies_booked)),
            _ => None,
        })
        .collect()
}

/// Builds the guest id -> money spent map from a user list.
pub fn guest_spending(users: &[User]) -> BTreeMap<u32, i64> {
    users
        .iter()
        .filter_map(|user| match user.role() {
            Role::Guest { money_spent, .. } => Some((user.id, *money_spent)),
            _ => None,
        })
        .collect()
}

/// Single-pass max with `>=`: the last tied maximum wins.
fn last_tied_max_key<V: PartialOrd + Copy>(map: &BTreeMap<u32, V>) -> Option<u32> {
    let mut best: Option<(u32, V)> = None;
    for (&key, &value) in map {
        match best {
            Some((_, best_value)) if value >= best_value => best = Some((key, value)),
            None => best = Some((key, value)),
            _ => {}
        }
    }
    best.map(|(key, _)| key)
}
