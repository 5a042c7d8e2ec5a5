//! Domain core for the ticket-booking manager.
//!
//! Provides entity records, the flat-file persistence gateway, the booking
//! engine with its aggregate counters, and the report queries. The
//! presentation layer is external and calls into these modules.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod persistence;
pub mod reports;
pub mod sequence;

pub use config::StoreConfig;
pub use engine::{BookingEngine, BookingRequest};
pub use error::BookingError;
pub use persistence::{FileStore, RecordResolver};
