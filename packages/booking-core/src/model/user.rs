//! User records and roles.

use serde::{Deserialize, Serialize};

/// Closed set of user roles with their role-specific fields.
///
/// Role-specific aggregates travel inside the variant, so serialization and
/// reporting match on the role exactly once instead of probing subtypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Guest {
        /// Total money spent on bookings
        money_spent: i64,
        /// Number of bookings made
        movies_booked: u32,
    },
    Receptionist {
        /// Desk window the receptionist works
        window_number: u32,
        /// Total revenue made from bookings
        revenue_made: i64,
        /// Number of bookings handled
        movies_booked: u32,
    },
}

impl Role {
    /// Creates a guest role with zeroed aggregates.
    pub fn guest() -> Self {
        Role::Guest {
            money_spent: 0,
            movies_booked: 0,
        }
    }

    /// Creates a receptionist role with zeroed aggregates.
    pub fn receptionist(window_number: u32) -> Self {
        Role::Receptionist {
            window_number,
            revenue_made: 0,
            movies_booked: 0,
        }
    }

    /// Role name as stored in the users file.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Guest { .. } => "Guest",
            Role::Receptionist { .. } => "Receptionist",
        }
    }
}

/// A user of the booking system.
///
/// The role is fixed at construction; changing a user's role means
/// constructing a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    role: Role,
}

impl User {
    pub fn new(
        id: u32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_guest(&self) -> bool {
        matches!(self.role, Role::Guest { .. })
    }

    pub fn is_receptionist(&self) -> bool {
        matches!(self.role, Role::Receptionist { .. })
    }

    /// Full display name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Number of bookings attributed to this user, 0 for admins.
    pub fn movies_booked(&self) -> u32 {
        match self.role {
            Role::Admin => 0,
            Role::Guest { movies_booked, .. } => movies_booked,
            Role::Receptionist { movies_booked, .. } => movies_booked,
        }
    }

    /// Money flowing through this user: spent for guests, made for
    /// receptionists, 0 for admins.
    pub fn money_total(&self) -> i64 {
        match self.role {
            Role::Admin => 0,
            Role::Guest { money_spent, .. } => money_spent,
            Role::Receptionist { revenue_made, .. } => revenue_made,
        }
    }

    /// Records a booking at the given ticket price against this user's
    /// aggregates. No-op for admins.
    pub fn record_booking(&mut self, price: i64) {
        match &mut self.role {
            Role::Admin => {}
            Role::Guest {
                money_spent,
                movies_booked,
            } => {
                *money_spent += price;
                *movies_booked += 1;
            }
            Role::Receptionist {
                revenue_made,
                movies_booked,
                ..
            } => {
                *revenue_made += price;
                *movies_booked += 1;
            }
        }
    }
}
