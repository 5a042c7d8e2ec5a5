//! Show catalog records.

use serde::{Deserialize, Serialize};

/// A scheduled show in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Externally supplied catalog id
    pub catalog_id: u32,
    /// Auto-incremented sequence id, the primary display key
    pub sequence_id: u32,
    pub title: String,
    pub ticket_price: i64,
    pub genre: String,
    pub time_hour: u32,
    pub time_minute: u32,
    pub date_day: u32,
    pub date_month: u32,
}

impl Show {
    /// Schedule formatted as `dd/MM HH:mm`.
    pub fn schedule_display(&self) -> String {
        format!(
            "{:02}/{:02} {:02}:{:02}",
            self.date_day, self.date_month, self.time_hour, self.time_minute
        )
    }
}
