//! Halls, seats, and the hall registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::sequence::Sequence;

/// A single seat in a hall.
///
/// Seat numbers are unique across the whole registry, not per hall, so a
/// seat is only addressable together with its hall id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub seat_number: u32,
    pub hall_id: u32,
    pub reserved: bool,
}

/// A hall and the seats it owns, keyed by seat number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hall {
    pub hall_id: u32,
    seats: BTreeMap<u32, Seat>,
}

impl Hall {
    pub fn seat(&self, seat_number: u32) -> Option<&Seat> {
        self.seats.get(&seat_number)
    }

    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.values()
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }
}

/// Registry of all halls, owning the hall and seat id sequences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HallRegistry {
    halls: BTreeMap<u32, Hall>,
    hall_seq: Sequence,
    seat_seq: Sequence,
}

impl HallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hall with `seat_count` free seats and returns its id.
    ///
    /// Seat numbers are drawn from the registry-wide sequence, so two halls
    /// never share a seat number even though lookups still key by
    /// `(hall_id, seat_number)`.
    pub fn create_hall(&mut self, seat_count: u32) -> u32 {
        let hall_id = self.hall_seq.next_id();
        let mut seats = BTreeMap::new();
        for _ in 0..seat_count {
            let seat_number = self.seat_seq.next_id();
            seats.insert(
                seat_number,
                Seat {
                    seat_number,
                    hall_id,
                    reserved: false,
                },
            );
        }
        self.halls.insert(hall_id, Hall { hall_id, seats });
        tracing::debug!("Created hall {} with {} seats", hall_id, seat_count);
        hall_id
    }

    pub fn hall(&self, hall_id: u32) -> Option<&Hall> {
        self.halls.get(&hall_id)
    }

    pub fn halls(&self) -> impl Iterator<Item = &Hall> {
        self.halls.values()
    }

    /// Looks up a seat by the `(hall_id, seat_number)` pair.
    pub fn seat(&self, hall_id: u32, seat_number: u32) -> Option<&Seat> {
        self.halls
            .get(&hall_id)
            .and_then(|hall| hall.seats.get(&seat_number))
    }

    /// Marks a seat reserved or free, failing if the seat does not exist.
    pub fn set_reserved(
        &mut self,
        hall_id: u32,
        seat_number: u32,
        reserved: bool,
    ) -> Result<(), BookingError> {
        let seat = self
            .halls
            .get_mut(&hall_id)
            .and_then(|hall| hall.seats.get_mut(&seat_number))
            .ok_or_else(|| {
                BookingError::RecordIntegrity(format!(
                    "Seat {} not found in hall {}",
                    seat_number, hall_id
                ))
            })?;
        seat.reserved = reserved;
        Ok(())
    }
}
