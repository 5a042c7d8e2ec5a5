//! Users text file: one space-separated line per user.
//!
//! Line schema: `id role firstName lastName username password [roleFields...]`
//! where roleFields are `revenue moviesBooked` for guests and
//! `revenue moviesBooked windowNumber` for receptionists. No quoting or
//! escaping; fields containing whitespace cannot round-trip (a known
//! limitation of the format, kept as-is).

use std::fs::{self, File, OpenOptions};
use std::io::Write;

use crate::error::{classify_io_error, BookingError};
use crate::model::{Role, User};

use super::FileStore;

/// Field index of the username within a serialized line.
const USERNAME_FIELD: usize = 4;
/// Minimum field count for a parseable line.
const MIN_FIELDS: usize = 6;

impl FileStore {
    /// Reads all users from the users file.
    ///
    /// Malformed lines (too few fields, unparseable numbers) are logged and
    /// skipped; an unknown role name parses as Admin. A missing or unreadable
    /// file fails the whole read with `FileAccess`.
    pub fn read_users(&self) -> Result<Vec<User>, BookingError> {
        let path = self.config().users_path();
        let contents = fs::read_to_string(&path)
            .map_err(|e| classify_io_error(e, "Failed to read users file"))?;

        let mut users = Vec::new();
        for (line_no, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_user_line(line) {
                Ok(user) => users.push(user),
                Err(reason) => {
                    tracing::warn!(
                        "Skipping malformed user line {}: {}",
                        line_no + 1,
                        reason
                    );
                }
            }
        }
        Ok(users)
    }

    /// Appends one user as a single line; existing lines are never touched.
    pub fn append_user(&self, user: &User) -> Result<(), BookingError> {
        self.ensure_data_dir()?;
        let path = self.config().users_path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| classify_io_error(e, "Failed to open users file"))?;
        writeln!(file, "{}", serialize_user_line(user))
            .map_err(|e| classify_io_error(e, "Failed to append user"))?;
        Ok(())
    }

    /// Removes every line whose username field matches.
    ///
    /// Returns whether anything was removed. When the username does not
    /// appear, the file is left completely untouched. The rewrite goes
    /// through a temp file and an atomic rename.
    pub fn remove_user(&self, username: &str) -> Result<bool, BookingError> {
        let path = self.config().users_path();
        if !path.exists() {
            return Ok(false);
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| classify_io_error(e, "Failed to read users file"))?;

        let retained: Vec<&str> = contents
            .lines()
            .filter(|line| line.split_whitespace().nth(USERNAME_FIELD) != Some(username))
            .collect();

        if retained.len() == contents.lines().count() {
            return Ok(false);
        }

        let temp_path = path.with_extension("txt.tmp");
        let mut file = File::create(&temp_path)
            .map_err(|e| classify_io_error(e, "Failed to create temp users file"))?;
        for line in &retained {
            writeln!(file, "{}", line)
                .map_err(|e| classify_io_error(e, "Failed to write users file"))?;
        }
        file.sync_all()
            .map_err(|e| classify_io_error(e, "Failed to sync users file"))?;
        fs::rename(&temp_path, &path)
            .map_err(|e| classify_io_error(e, "Failed to rename users file"))?;

        tracing::debug!("Removed user '{}' from users file", username);
        Ok(true)
    }
}

/// Serializes a user as one space-joined line in fixed field order.
fn serialize_user_line(user: &User) -> String {
    let mut line = format!(
        "{} {} {} {} {} {}",
        user.id,
        user.role().name(),
        user.first_name,
        user.last_name,
        user.username,
        user.password
    );
    match user.role() {
        Role::Admin => {}
        Role::Guest {
            money_spent,
            movies_booked,
        } => {
            line.push_str(&format!(" {} {}", money_spent, movies_booked));
        }
        Role::Receptionist {
            window_number,
            revenue_made,
            movies_booked,
        } => {
            line.push_str(&format!(" {} {} {}", revenue_made, movies_booked, window_number));
        }
    }
    line
}

/// Parses one line into a user, or a reason for skipping it.
fn parse_user_line(line: &str) -> Result<User, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_FIELDS {
        return Err(format!("expected at least {} fields, got {}", MIN_FIELDS, fields.len()));
    }

    let id: u32 = fields[0]
        .parse()
        .map_err(|_| format!("invalid user id '{}'", fields[0]))?;

    let role = match fields[1] {
        "Guest" => {
            let money_spent = parse_role_field(&fields, 6, "guest revenue")?;
            let movies_booked = parse_count_field(&fields, 7, "guest bookings")?;
            Role::Guest {
                money_spent,
                movies_booked,
            }
        }
        "Receptionist" => {
            let revenue_made = parse_role_field(&fields, 6, "receptionist revenue")?;
            let movies_booked = parse_count_field(&fields, 7, "receptionist bookings")?;
            let window_number = parse_count_field(&fields, 8, "window number")?;
            Role::Receptionist {
                window_number,
                revenue_made,
                movies_booked,
            }
        }
        "Admin" => Role::Admin,
        other => {
            tracing::warn!("Unknown role '{}', defaulting to Admin", other);
            Role::Admin
        }
    };

    Ok(User::new(
        id, fields[2], fields[3], fields[4], fields[5], role,
    ))
}

fn parse_role_field(fields: &[&str], index: usize, what: &str) -> Result<i64, String> {
    let raw = fields
        .get(index)
        .ok_or_else(|| format!("missing {} field", what))?;
    raw.parse()
        .map_err(|_| format!("invalid {} '{}'", what, raw))
}

/// Counts and window numbers are never negative on disk.
fn parse_count_field(fields: &[&str], index: usize, what: &str) -> Result<u32, String> {
    let value = parse_role_field(fields, index, what)?;
    u32::try_from(value).map_err(|_| format!("invalid {} '{}'", what, value))
}
