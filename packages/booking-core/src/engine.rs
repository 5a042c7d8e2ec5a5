//! Booking engine: seat reservation, aggregate counters, and the
//! create/cancel workflows.
//!
//! Per seat the state machine is Free -> Reserved on creation and back to
//! Free on cancellation; there are no holds or expiry timers. The durable
//! file write always happens before any in-memory mutation, so a failed
//! append leaves counters, seats, and user aggregates untouched.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::BookingError;
use crate::model::{Booking, HallRegistry, Movie, Show, User};
use crate::persistence::FileStore;
use crate::sequence::Sequence;

/// Input for a booking creation: what is being booked, where, and when.
#[derive(Debug, Clone, Copy)]
pub struct BookingRequest<'a> {
    pub movie: Option<&'a Movie>,
    pub show: Option<&'a Show>,
    pub hall_id: u32,
    pub seat_number: u32,
    pub date: NaiveDate,
}

/// The booking engine.
///
/// Owns the process-wide aggregate counters (movie id -> booking count,
/// show id -> booking count) and the booking number sequence. Counters are
/// `BTreeMap`s so every scan iterates in ascending key order and ties
/// resolve deterministically to the lowest key.
#[derive(Debug)]
pub struct BookingEngine {
    store: FileStore,
    movie_counts: BTreeMap<u32, u32>,
    show_counts: BTreeMap<u32, u32>,
    booking_seq: Sequence,
}

impl BookingEngine {
    /// Creates an engine writing through the given file store.
    pub fn new(store: FileStore) -> Self {
        Self {
            store,
            movie_counts: BTreeMap::new(),
            show_counts: BTreeMap::new(),
            booking_seq: Sequence::new(),
        }
    }

    /// Rebuilds counters and the booking number sequence from a loaded
    /// booking list. Called once at startup; afterwards the engine maintains
    /// the index incrementally.
    pub fn rebuild_counters(&mut self, bookings: &[Booking]) {
        self.movie_counts.clear();
        self.show_counts.clear();
        for booking in bookings {
            if let Some(movie_id) = booking.movie_id {
                *self.movie_counts.entry(movie_id).or_insert(0) += 1;
            }
            if let Some(show_id) = booking.show_id {
                *self.show_counts.entry(show_id).or_insert(0) += 1;
            }
            self.booking_seq.observe(booking.booking_number);
        }
    }

    /// Creates a booking for the requested seat.
    ///
    /// The seat must exist and be free; the booking must reference at least
    /// a movie or a show. The record is appended to the bookings file first,
    /// and only after a successful write are the seat, the counters, and the
    /// guest/receptionist aggregates updated. The booked price is the show's
    /// ticket price when a show is attached, otherwise the movie's.
    pub fn create_booking(
        &mut self,
        request: BookingRequest<'_>,
        guest: &mut User,
        receptionist: &mut User,
        halls: &mut HallRegistry,
    ) -> Result<Booking, BookingError> {
        let seat = halls
            .seat(request.hall_id, request.seat_number)
            .ok_or_else(|| {
                BookingError::RecordIntegrity(format!(
                    "Seat {} not found in hall {}",
                    request.seat_number, request.hall_id
                ))
            })?;
        if seat.reserved {
            return Err(BookingError::SeatAlreadyReserved {
                hall_id: request.hall_id,
                seat_number: request.seat_number,
            });
        }
        let price = match (request.show, request.movie) {
            (Some(show), _) => show.ticket_price,
            (None, Some(movie)) => movie.ticket_price,
            (None, None) => {
                return Err(BookingError::RecordIntegrity(
                    "Booking references neither a movie nor a show".to_string(),
                ))
            }
        };

        let booking = Booking {
            booking_number: self.booking_seq.peek(),
            date_created: request.date,
            movie_id: request.movie.map(|m| m.sequence_id),
            show_id: request.show.map(|s| s.sequence_id),
            guest_id: guest.id,
            receptionist_id: receptionist.id,
            seat_number: request.seat_number,
            hall_id: request.hall_id,
        };

        // Durable write first; nothing in memory moves if it fails.
        self.store.append_booking(&booking)?;

        self.booking_seq.next_id();
        halls.set_reserved(request.hall_id, request.seat_number, true)?;
        if let Some(movie) = request.movie {
            *self.movie_counts.entry(movie.sequence_id).or_insert(0) += 1;
        }
        if let Some(show) = request.show {
            *self.show_counts.entry(show.sequence_id).or_insert(0) += 1;
        }
        receptionist.record_booking(price);
        guest.record_booking(price);

        tracing::debug!(
            "Created booking {} (hall {}, seat {}, price {})",
            booking.booking_number,
            booking.hall_id,
            booking.seat_number,
            price
        );
        Ok(booking)
    }

    /// Cancels a booking: rewrites the bookings file without it, decrements
    /// the movie/show counters (floored at 0), and frees the seat.
    ///
    /// Cancelling an already-cancelled booking is harmless: the rewrite
    /// finds nothing to drop, floored counters stay at 0, and freeing a free
    /// seat is a no-op.
    pub fn cancel_booking(
        &mut self,
        booking: &Booking,
        halls: &mut HallRegistry,
    ) -> Result<(), BookingError> {
        // Durable rewrite first, mirroring creation.
        let removed = self
            .store
            .rewrite_bookings_excluding(booking.booking_number)?;
        if !removed {
            tracing::warn!(
                "Booking {} was not present in the bookings file",
                booking.booking_number
            );
        }

        if let Some(movie_id) = booking.movie_id {
            if let Some(count) = self.movie_counts.get_mut(&movie_id) {
                *count = count.saturating_sub(1);
            }
        }
        if let Some(show_id) = booking.show_id {
            if let Some(count) = self.show_counts.get_mut(&show_id) {
                *count = count.saturating_sub(1);
            }
        }
        halls.set_reserved(booking.hall_id, booking.seat_number, false)?;

        tracing::debug!("Cancelled booking {}", booking.booking_number);
        Ok(())
    }

    /// The movie id with the highest booking count; on ties the
    /// first-encountered key under ascending iteration wins.
    pub fn most_booked_movie_id(&self) -> Option<u32> {
        first_tied_max_key(&self.movie_counts)
    }

    /// The show id with the highest booking count; on ties the
    /// first-encountered key under ascending iteration wins.
    pub fn most_booked_show_id(&self) -> Option<u32> {
        first_tied_max_key(&self.show_counts)
    }

    pub fn movie_count(&self, movie_id: u32) -> u32 {
        self.movie_counts.get(&movie_id).copied().unwrap_or(0)
    }

    pub fn show_count(&self, show_id: u32) -> u32 {
        self.show_counts.get(&show_id).copied().unwrap_or(0)
    }

    pub fn movie_counts(&self) -> &BTreeMap<u32, u32> {
        &self.movie_counts
    }

    pub fn show_counts(&self) -> &BTreeMap<u32, u32> {
        &self.show_counts
    }
}

/// Single-pass max with strict `>`: the first tied maximum wins.
fn first_tied_max_key(map: &BTreeMap<u32, u32>) -> Option<u32> {
    let mut best: Option<(u32, u32)> = None;
    for (&key, &count) in map {
        match best {
            Some((_, best_count)) if count > best_count => best = Some((key, count)),
            None => best = Some((key, count)),
            _ => {}
        }
    }
    best.map(|(key, _)| key)
}
