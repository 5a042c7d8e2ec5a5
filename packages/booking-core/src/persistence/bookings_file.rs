//! Bookings binary file: a sequence of fixed-layout records terminated by
//! end-of-stream.
//!
//! Record layout, in order: booking number (i32), creation date as a
//! length-prefixed `dd/MM/yyyy` string, movie id or -1, guest id,
//! receptionist id, seat number, hall id (seat lookup key), hall id again,
//! show id or -1. All integers big-endian i32, string lengths big-endian
//! u16. No record-count header, no checksums.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Read, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{classify_io_error, BookingError};
use crate::model::booking::BOOKING_DATE_FORMAT;
use crate::model::Booking;

use super::{FileStore, RecordResolver};

/// Sentinel for an absent movie or show reference.
const NO_REFERENCE: i32 = -1;

/// On-disk record before foreign-key resolution.
#[derive(Debug, Clone)]
struct RawRecord {
    booking_number: i32,
    date: String,
    movie_id: i32,
    guest_id: i32,
    receptionist_id: i32,
    seat_number: i32,
    hall_id: i32,
    hall_id_again: i32,
    show_id: i32,
}

impl FileStore {
    /// Reads and resolves all bookings.
    ///
    /// Every foreign key is resolved against the supplied collections; a
    /// dangling seat, user, movie, or show reference fails the whole load
    /// with `RecordIntegrity`. A missing file yields an empty list.
    pub fn read_bookings(&self, resolver: &RecordResolver<'_>) -> Result<Vec<Booking>, BookingError> {
        let raw = self.read_raw_records()?;
        raw.into_iter()
            .map(|record| resolve_record(record, resolver))
            .collect()
    }

    /// Appends one booking record in the fixed field order.
    pub fn append_booking(&self, booking: &Booking) -> Result<(), BookingError> {
        self.ensure_data_dir()?;
        let path = self.config().bookings_path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| classify_io_error(e, "Failed to open bookings file"))?;
        write_record(&mut file, booking)
            .map_err(|e| classify_io_error(e, "Failed to append booking"))?;
        file.sync_all()
            .map_err(|e| classify_io_error(e, "Failed to sync bookings file"))?;
        Ok(())
    }

    /// Rewrites the bookings file without the given booking number.
    ///
    /// Returns whether the booking was present. Resolution is skipped here:
    /// cancellation of a record must not be blocked by unrelated dangling
    /// references. O(n) in the file size, inherent to the format.
    pub fn rewrite_bookings_excluding(&self, booking_number: u32) -> Result<bool, BookingError> {
        let raw = self.read_raw_records()?;
        let retained: Vec<RawRecord> = raw
            .iter()
            .filter(|r| r.booking_number != booking_number as i32)
            .cloned()
            .collect();
        if retained.len() == raw.len() {
            return Ok(false);
        }

        let path = self.config().bookings_path();
        let temp_path = path.with_extension("bin.tmp");
        let mut file = File::create(&temp_path)
            .map_err(|e| classify_io_error(e, "Failed to create temp bookings file"))?;
        for record in &retained {
            write_raw_record(&mut file, record)
                .map_err(|e| classify_io_error(e, "Failed to write bookings file"))?;
        }
        file.sync_all()
            .map_err(|e| classify_io_error(e, "Failed to sync bookings file"))?;
        fs::rename(&temp_path, &path)
            .map_err(|e| classify_io_error(e, "Failed to rename bookings file"))?;

        tracing::debug!("Removed booking {} from bookings file", booking_number);
        Ok(true)
    }

    /// Reads raw records until end-of-stream.
    fn read_raw_records(&self) -> Result<Vec<RawRecord>, BookingError> {
        let path = self.config().bookings_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        read_raw_records_from(&path)
    }
}

fn read_raw_records_from(path: &Path) -> Result<Vec<RawRecord>, BookingError> {
    let mut file =
        File::open(path).map_err(|e| classify_io_error(e, "Failed to open bookings file"))?;
    let mut records = Vec::new();
    loop {
        match read_record(&mut file) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => break,
            Err(e) => {
                return Err(classify_io_error(e, "Failed to read booking record"));
            }
        }
    }
    Ok(records)
}

/// Resolves one raw record against the loaded collections.
fn resolve_record(
    raw: RawRecord,
    resolver: &RecordResolver<'_>,
) -> Result<Booking, BookingError> {
    if raw.hall_id != raw.hall_id_again {
        tracing::warn!(
            "Booking {}: hall id fields disagree ({} vs {})",
            raw.booking_number,
            raw.hall_id,
            raw.hall_id_again
        );
    }

    let date_created = NaiveDate::parse_from_str(&raw.date, BOOKING_DATE_FORMAT).map_err(|_| {
        BookingError::MalformedRecord(format!(
            "Booking {}: invalid date '{}'",
            raw.booking_number, raw.date
        ))
    })?;

    let booking_number = non_negative(raw.booking_number, "booking number", raw.booking_number)?;
    let guest_id = non_negative(raw.guest_id, "guest id", raw.booking_number)?;
    let receptionist_id = non_negative(raw.receptionist_id, "receptionist id", raw.booking_number)?;
    let seat_number = non_negative(raw.seat_number, "seat number", raw.booking_number)?;
    let hall_id = non_negative(raw.hall_id, "hall id", raw.booking_number)?;

    resolver.user(guest_id).ok_or_else(|| {
        BookingError::RecordIntegrity(format!(
            "Booking {}: guest {} not found",
            booking_number, guest_id
        ))
    })?;
    resolver.user(receptionist_id).ok_or_else(|| {
        BookingError::RecordIntegrity(format!(
            "Booking {}: receptionist {} not found",
            booking_number, receptionist_id
        ))
    })?;
    resolver.halls.seat(hall_id, seat_number).ok_or_else(|| {
        BookingError::RecordIntegrity(format!(
            "Booking {}: seat {} not found in hall {}",
            booking_number, seat_number, hall_id
        ))
    })?;

    let movie_id = match raw.movie_id {
        NO_REFERENCE => None,
        id => {
            let id = non_negative(id, "movie id", raw.booking_number)?;
            resolver.movie(id).ok_or_else(|| {
                BookingError::RecordIntegrity(format!(
                    "Booking {}: movie {} not found",
                    booking_number, id
                ))
            })?;
            Some(id)
        }
    };
    let show_id = match raw.show_id {
        NO_REFERENCE => None,
        id => {
            let id = non_negative(id, "show id", raw.booking_number)?;
            resolver.show(id).ok_or_else(|| {
                BookingError::RecordIntegrity(format!(
                    "Booking {}: show {} not found",
                    booking_number, id
                ))
            })?;
            Some(id)
        }
    };

    Ok(Booking {
        booking_number,
        date_created,
        movie_id,
        show_id,
        guest_id,
        receptionist_id,
        seat_number,
        hall_id,
    })
}

fn non_negative(value: i32, what: &str, booking: i32) -> Result<u32, BookingError> {
    u32::try_from(value).map_err(|_| {
        BookingError::MalformedRecord(format!("Booking {}: negative {} {}", booking, what, value))
    })
}

fn write_record(w: &mut impl Write, booking: &Booking) -> io::Result<()> {
    write_raw_record(
        w,
        &RawRecord {
            booking_number: booking.booking_number as i32,
            date: booking.date_display(),
            movie_id: booking.movie_id.map_or(NO_REFERENCE, |id| id as i32),
            guest_id: booking.guest_id as i32,
            receptionist_id: booking.receptionist_id as i32,
            seat_number: booking.seat_number as i32,
            hall_id: booking.hall_id as i32,
            hall_id_again: booking.hall_id as i32,
            show_id: booking.show_id.map_or(NO_REFERENCE, |id| id as i32),
        },
    )
}

fn write_raw_record(w: &mut impl Write, record: &RawRecord) -> io::Result<()> {
    write_i32(w, record.booking_number)?;
    write_string(w, &record.date)?;
    write_i32(w, record.movie_id)?;
    write_i32(w, record.guest_id)?;
    write_i32(w, record.receptionist_id)?;
    write_i32(w, record.seat_number)?;
    write_i32(w, record.hall_id)?;
    write_i32(w, record.hall_id_again)?;
    write_i32(w, record.show_id)?;
    Ok(())
}

/// Reads one record, or `None` on a clean end-of-stream.
///
/// End-of-stream mid-record is an `UnexpectedEof` error: the format has no
/// way to resync, so a truncated tail fails the load.
fn read_record(r: &mut impl Read) -> io::Result<Option<RawRecord>> {
    let booking_number = match try_read_i32(r)? {
        Some(v) => v,
        None => return Ok(None),
    };
    Ok(Some(RawRecord {
        booking_number,
        date: read_string(r)?,
        movie_id: read_i32(r)?,
        guest_id: read_i32(r)?,
        receptionist_id: read_i32(r)?,
        seat_number: read_i32(r)?,
        hall_id: read_i32(r)?,
        hall_id_again: read_i32(r)?,
        show_id: read_i32(r)?,
    }))
}

fn write_i32(w: &mut impl Write, value: i32) -> io::Result<()> {
    w.write_all(&value.to_be_bytes())
}

fn read_i32(r: &mut impl Read) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

/// Reads an i32, mapping a clean end-of-stream at the first byte to `None`.
fn try_read_i32(r: &mut impl Read) -> io::Result<Option<i32>> {
    let mut buf = [0u8; 4];
    let mut read = 0;
    while read < buf.len() {
        match r.read(&mut buf[read..]) {
            Ok(0) if read == 0 => return Ok(None),
            Ok(0) => {
                return Err(io::Error::new(
                    ErrorKind::UnexpectedEof,
                    "truncated booking record",
                ))
            }
            Ok(n) => read += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(Some(i32::from_be_bytes(buf)))
}

fn write_string(w: &mut impl Write, value: &str) -> io::Result<()> {
    let bytes = value.as_bytes();
    let len = u16::try_from(bytes.len())
        .map_err(|_| io::Error::new(ErrorKind::InvalidInput, "string too long for record"))?;
    w.write_all(&len.to_be_bytes())?;
    w.write_all(bytes)
}

fn read_string(r: &mut impl Read) -> io::Result<String> {
    let mut len_buf = [0u8; 2];
    r.read_exact(&mut len_buf)?;
    let len = u16::from_be_bytes(len_buf) as usize;
    let mut bytes = vec![0u8; len];
    r.read_exact(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|_| io::Error::new(ErrorKind::InvalidData, "record string is not UTF-8"))
}
