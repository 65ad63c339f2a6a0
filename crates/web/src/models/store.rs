//! Grocery store domain type.

use chrono::{DateTime, Utc};

use grocery_core::{StoreId, UserId, Username};

/// A grocery retailer location.
#[derive(Debug, Clone)]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Display name, 3-80 characters.
    pub title: String,
    /// Street address, 3-80 characters.
    pub address: String,
    /// User who created the store. Never changes after creation.
    pub created_by: UserId,
    /// Username of the creator.
    pub created_by_username: Username,
    /// When the store was created.
    pub created_at: DateTime<Utc>,
}
