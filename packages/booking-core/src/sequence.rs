//! Monotonic id sequences.
//!
//! Every auto-incrementing id in the system (users, movies, shows, halls,
//! seats, bookings) is drawn from a `Sequence` owned by exactly one catalog
//! or registry. Nothing is read from static state.

use serde::{Deserialize, Serialize};

/// A monotonic id generator starting at 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    next: u32,
}

impl Sequence {
    /// Creates a sequence whose first issued id is 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Creates a sequence whose first issued id follows `max_seen`.
    ///
    /// Used after loading persisted records to resume numbering past the
    /// highest id already on disk.
    pub fn starting_after(max_seen: u32) -> Self {
        Self {
            next: max_seen.saturating_add(1),
        }
    }

    /// Issues the next id.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to `next_id` will return.
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Advances the sequence so it never re-issues `seen`.
    pub fn observe(&mut self, seen: u32) {
        if seen >= self.next {
            self.next = seen.saturating_add(1);
        }
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}
