//! User domain types.

use chrono::{DateTime, Utc};

use grocery_core::{UserId, Username};

/// A registered user (domain type).
///
/// The password hash is never part of this type; it is only read by the
/// authentication service when verifying credentials.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: Username,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
}
