//! Entity records: users, movies, shows, halls, seats, and bookings.

pub mod booking;
pub mod hall;
pub mod movie;
pub mod show;
pub mod user;

pub use booking::Booking;
pub use hall::{Hall, HallRegistry, Seat};
pub use movie::Movie;
pub use show::Show;
pub use user::{Role, User};
