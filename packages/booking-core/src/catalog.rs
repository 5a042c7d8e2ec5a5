//! In-memory movie and show catalogs with input validation.
//!
//! Catalogs own their sequence generators; a loaded snapshot advances the
//! sequence past every persisted id so numbering resumes without collisions.

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::movie::{parse_genres, Movie};
use crate::model::show::Show;
use crate::sequence::Sequence;

/// Inclusive ticket price bounds enforced at input-validation time.
pub const MIN_TICKET_PRICE: i64 = 40;
pub const MAX_TICKET_PRICE: i64 = 250;

/// Input validation failures, reported to the caller as retryable
/// rejections. These never travel through the persistence error taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Ticket price {0} out of range [{MIN_TICKET_PRICE}, {MAX_TICKET_PRICE}]")]
    TicketPriceOutOfRange(i64),

    #[error("Required field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("Genre list is empty or contains no valid tags")]
    EmptyGenre,

    #[error("Invalid time {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },

    #[error("Invalid date {day:02}/{month:02}")]
    InvalidDate { day: u32, month: u32 },
}

/// Validates a ticket price against the inclusive [40, 250] bounds.
pub fn validate_ticket_price(price: i64) -> Result<(), ValidationError> {
    if !(MIN_TICKET_PRICE..=MAX_TICKET_PRICE).contains(&price) {
        return Err(ValidationError::TicketPriceOutOfRange(price));
    }
    Ok(())
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

/// Movie input as entered by an admin, genres still slash-delimited.
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub catalog_id: u32,
    pub name: String,
    pub ticket_price: i64,
    pub director: String,
    pub genres: String,
    pub published: NaiveDate,
    pub duration_hours: u32,
    pub duration_minutes: u32,
}

/// Show input as entered by an admin.
#[derive(Debug, Clone)]
pub struct NewShow {
    pub catalog_id: u32,
    pub title: String,
    pub ticket_price: i64,
    pub genre: String,
    pub time_hour: u32,
    pub time_minute: u32,
    pub date_day: u32,
    pub date_month: u32,
}

/// The in-memory movie catalog exposed to the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    movies: Vec<Movie>,
    sequence: Sequence,
}

impl MovieCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a catalog from a loaded snapshot, resuming the sequence
    /// past the highest persisted id.
    pub fn from_records(movies: Vec<Movie>) -> Self {
        let max_seen = movies.iter().map(|m| m.sequence_id).max().unwrap_or(0);
        Self {
            movies,
            sequence: Sequence::starting_after(max_seen),
        }
    }

    /// Validates the input and adds a movie, returning its sequence id.
    pub fn add(&mut self, input: NewMovie) -> Result<u32, ValidationError> {
        require_non_empty(&input.name, "name")?;
        require_non_empty(&input.director, "director")?;
        validate_ticket_price(input.ticket_price)?;
        let genres = parse_genres(&input.genres);
        if genres.is_empty() {
            return Err(ValidationError::EmptyGenre);
        }

        let sequence_id = self.sequence.next_id();
        self.movies.push(Movie {
            catalog_id: input.catalog_id,
            sequence_id,
            name: input.name,
            ticket_price: input.ticket_price,
            director: input.director,
            genres,
            published: input.published,
            duration_hours: input.duration_hours,
            duration_minutes: input.duration_minutes,
        });
        Ok(sequence_id)
    }

    /// Removes a movie by sequence id, returning whether one was removed.
    pub fn remove(&mut self, sequence_id: u32) -> bool {
        let before = self.movies.len();
        self.movies.retain(|m| m.sequence_id != sequence_id);
        self.movies.len() != before
    }

    pub fn find(&self, sequence_id: u32) -> Option<&Movie> {
        self.movies.iter().find(|m| m.sequence_id == sequence_id)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// The in-memory show catalog exposed to the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct ShowCatalog {
    shows: Vec<Show>,
    sequence: Sequence,
}

impl ShowCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a catalog from a loaded snapshot, resuming the sequence
    /// past the highest persisted id.
    pub fn from_records(shows: Vec<Show>) -> Self {
        let max_seen = shows.iter().map(|s| s.sequence_id).max().unwrap_or(0);
        Self {
            shows,
            sequence: Sequence::starting_after(max_seen),
        }
    }

    /// Validates the input and adds a show, returning its sequence id.
    pub fn add(&mut self, input: NewShow) -> Result<u32, ValidationError> {
        require_non_empty(&input.title, "title")?;
        require_non_empty(&input.genre, "genre")?;
        validate_ticket_price(input.ticket_price)?;
        if input.time_hour > 23 || input.time_minute > 59 {
            return Err(ValidationError::InvalidTime {
                hour: input.time_hour,
                minute: input.time_minute,
            });
        }
        if !(1..=31).contains(&input.date_day) || !(1..=12).contains(&input.date_month) {
            return Err(ValidationError::InvalidDate {
                day: input.date_day,
                month: input.date_month,
            });
        }

        let sequence_id = self.sequence.next_id();
        self.shows.push(Show {
            catalog_id: input.catalog_id,
            sequence_id,
            title: input.title,
            ticket_price: input.ticket_price,
            genre: input.genre,
            time_hour: input.time_hour,
            time_minute: input.time_minute,
            date_day: input.date_day,
            date_month: input.date_month,
        });
        Ok(sequence_id)
    }

    /// Removes a show by sequence id, returning whether one was removed.
    pub fn remove(&mut self, sequence_id: u32) -> bool {
        let before = self.shows.len();
        self.shows.retain(|s| s.sequence_id != sequence_id);
        self.shows.len() != before
    }

    pub fn find(&self, sequence_id: u32) -> Option<&Show> {
        self.shows.iter().find(|s| s.sequence_id == sequence_id)
    }

    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }
}
