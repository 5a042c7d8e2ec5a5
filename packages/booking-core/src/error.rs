//! Booking system error types.

use std::io::ErrorKind;

use thiserror::Error;

/// Errors surfaced by the persistence gateway and booking engine.
#[derive(Error, Debug, Clone)]
pub enum BookingError {
    /// File missing or unwritable; the operation was aborted
    #[error("File access error: {0}")]
    FileAccess(String),

    /// A line or binary record failed to parse
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A foreign-key reference could not be resolved during load
    #[error("Record integrity error: {0}")]
    RecordIntegrity(String),

    /// Seat was already reserved when a booking was attempted
    #[error("Seat {seat_number} in hall {hall_id} is already reserved")]
    SeatAlreadyReserved { hall_id: u32, seat_number: u32 },

    /// Snapshot serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Other I/O error during persistence
    #[error("I/O error: {0}")]
    Io(String),
}

/// Classifies I/O errors into specific BookingError variants.
pub fn classify_io_error(error: std::io::Error, context: &str) -> BookingError {
    match error.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => {
            BookingError::FileAccess(format!("{}: {}", context, error))
        }
        ErrorKind::UnexpectedEof | ErrorKind::InvalidData => {
            BookingError::MalformedRecord(format!("{}: {}", context, error))
        }
        _ => BookingError::Io(format!("{}: {}", context, error)),
    }
}
