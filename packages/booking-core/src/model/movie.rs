//! Movie catalog records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A movie in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Externally supplied catalog id
    pub catalog_id: u32,
    /// Auto-incremented sequence id, the primary display key
    pub sequence_id: u32,
    pub name: String,
    pub ticket_price: i64,
    pub director: String,
    /// Free-text genre tags, slash-delimited on input
    pub genres: Vec<String>,
    pub published: NaiveDate,
    pub duration_hours: u32,
    pub duration_minutes: u32,
}

impl Movie {
    /// Genres joined back into the slash-delimited display form.
    pub fn genre_display(&self) -> String {
        self.genres.join("/")
    }

    /// Duration formatted as `h:mm`.
    pub fn duration_display(&self) -> String {
        format!("{}:{:02}", self.duration_hours, self.duration_minutes)
    }
}

/// Splits a slash-delimited genre string into trimmed, non-empty tags.
pub fn parse_genres(raw: &str) -> Vec<String> {
    raw.split('/')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
