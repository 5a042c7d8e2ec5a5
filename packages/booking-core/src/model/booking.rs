//! Booking records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used in the bookings file.
pub const BOOKING_DATE_FORMAT: &str = "%d/%m/%Y";

/// A booking tying a guest, a receptionist, and a seat together with the
/// movie and/or show that was booked.
///
/// Foreign keys are stored as ids; resolution happens when the bookings
/// file is loaded against the user, catalog, and hall collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_number: u32,
    pub date_created: NaiveDate,
    /// Movie sequence id, absent for show-only bookings
    pub movie_id: Option<u32>,
    /// Show sequence id, absent for movie-only bookings
    pub show_id: Option<u32>,
    pub guest_id: u32,
    pub receptionist_id: u32,
    pub seat_number: u32,
    pub hall_id: u32,
}

impl Booking {
    /// Creation date in the on-disk `dd/MM/yyyy` form.
    pub fn date_display(&self) -> String {
        self.date_created.format(BOOKING_DATE_FORMAT).to_string()
    }
}
